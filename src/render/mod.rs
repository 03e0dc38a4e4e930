//! Page rendering: conversion, highlighting, image inspection and assembly

mod converter;
mod highlight;
mod image;
mod page;
pub mod process;

pub use converter::{Converter, Fragment};
pub use highlight::Highlighter;
pub use image::{parse_identify, ImageProbe};
pub use page::PageRenderer;
