//! Course completion certificates: a paragraph from Gemini (or a fixed
//! fallback) laid over a background image and exported as a one-page PDF.

pub mod agents;
pub mod certificate;
pub mod config;
pub mod errors;
pub mod pdf;
pub mod routes;
pub mod state;
pub mod storage;
pub mod submission;
pub mod templates;
