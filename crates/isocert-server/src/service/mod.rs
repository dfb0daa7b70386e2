// Services behind the HTTP handlers

pub mod generation; // Document generation for an application
pub mod storage; // Upload directory layout and file removal
pub mod upload; // Multipart file extraction
