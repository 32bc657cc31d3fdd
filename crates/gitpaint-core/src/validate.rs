use std::path::{Component, Path};

use crate::config::EncodeParams;
use crate::error::{GpError, Result};
use crate::palette::ACTIVITY_PALETTE;

pub fn validate_params(p: &EncodeParams) -> Result<()> {
    if p.multiplier == 0 {
        return Err(GpError::Validation("multiplier must be >= 1".into()));
    }

    // Fewer than two levels cannot distinguish activity from none.
    if p.palette_size < 2 {
        return Err(GpError::Validation("palette_size must be >= 2".into()));
    }
    if p.palette_size > ACTIVITY_PALETTE.len() {
        return Err(GpError::Validation(format!(
            "palette_size must be <= {}",
            ACTIVITY_PALETTE.len()
        )));
    }

    if p.target_file.trim().is_empty() {
        return Err(GpError::Validation("target_file must not be empty".into()));
    }
    // The tracked file must stay inside the working tree the driver owns.
    let path = Path::new(&p.target_file);
    let escapes = path.file_name().is_none()
        || path
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if escapes {
        return Err(GpError::Validation(format!(
            "target_file must be a relative path inside the working tree: {}",
            p.target_file
        )));
    }

    Ok(())
}
