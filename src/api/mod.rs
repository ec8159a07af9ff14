pub mod advice;
pub mod gemini;

pub use advice::{Advice, AdviceRequest, Advisor, SoilEstimate, render_advice};
pub use gemini::{AdvisorError, GeminiAdvisor};
