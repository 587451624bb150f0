// Blueprint Generator
// Implements: prompt building, Gemini generation, shape validation, HTML table rendering,
// item feedback and DOCX export.
// All LLM calls go through llm_client, never directly to the generative API.

pub mod export;
pub mod feedback;
pub mod generator;
pub mod handlers;
pub mod models;
pub mod page;
pub mod prompts;
pub mod render;
