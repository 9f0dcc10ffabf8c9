pub mod check;
pub mod ocr;
pub mod recognize;
pub mod tag;
pub mod tags;
