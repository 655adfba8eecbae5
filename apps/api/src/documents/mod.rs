// Uploaded consent documents: text extraction for the Analyze tab.

pub mod extract;
pub mod handlers;
