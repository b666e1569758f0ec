//! Backends module - Input acquisition and output plumbing around the stage chain
//!
//! Provides:
//! - cat: Streaming an input through the chain
//! - filelist: Reading input names from list files
//! - list: Directory listings with walkdir
//! - output: Output sink selection

pub mod cat;
pub mod filelist;
pub mod list;
pub mod output;
