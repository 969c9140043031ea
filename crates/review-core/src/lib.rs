pub mod advanced;
pub mod analysis;
pub mod api;
pub mod categories;
pub mod error;
pub mod export;
pub mod lexicon;
pub mod model;
pub mod parser;
pub mod restaurants;
pub mod stats;
pub mod words;
