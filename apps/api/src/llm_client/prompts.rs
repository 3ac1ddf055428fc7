// Shared prompt fragments.
// Each operation that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting fragments.

/// Appended to any request that carries a structured-output contract.
pub const STRUCTURED_OUTPUT_INSTRUCTION: &str = "\
    Deliver the result ONLY through the provided tool. \
    Every field in the schema is mandatory: never omit a key, never return null, \
    never add commentary outside the tool call.";

/// Shared ban list for every generative call in the product.
pub const NO_CLICHE_INSTRUCTION: &str = "\
    Avoid all cliches and generic advice (e.g. \"follow your passion\", \"work hard\", \
    \"network more\"). Every sentence must be specific to this person.";
