use iryeok_core::error::IryeokError;
use iryeok_core::extraction::read_pdf;
use iryeok_core::photo::{self, DEFAULT_PHOTO_FOOTPRINT};
use std::path::Path;

use crate::output;

pub fn run(input_file: &Path) -> Result<(), IryeokError> {
    let bytes = read_pdf(input_file)?;
    let images = photo::list_images(&bytes)?;

    if images.is_empty() {
        println!("No embedded images.");
        return Ok(());
    }
    println!("{}", output::table::format_images(&images, DEFAULT_PHOTO_FOOTPRINT));
    Ok(())
}
