use adcanvas_core::{CanvasError, Position};

use crate::template::TemplateModel;

/// Validate a template for structural correctness.
///
/// The pipeline never calls this; it renders whatever it is given. Hosts use it
/// to reject templates that would render degenerately.
pub fn validate_template(template: &TemplateModel) -> Result<(), Vec<CanvasError>> {
    let mut errors = Vec::new();

    if template.caption.font_size == 0 {
        errors.push(CanvasError::InvalidTemplate(
            "caption.font_size must be positive".into(),
        ));
    }
    if template.caption.max_characters_per_line == 0 {
        errors.push(CanvasError::InvalidTemplate(
            "caption.max_characters_per_line must be at least 1".into(),
        ));
    }
    if template.cta.font_size == 0 {
        errors.push(CanvasError::InvalidTemplate(
            "cta.font_size must be positive".into(),
        ));
    }

    for (name, url) in [
        ("urls.mask", &template.urls.mask),
        ("urls.stroke", &template.urls.stroke),
        ("urls.design_pattern", &template.urls.design_pattern),
    ] {
        if url.trim().is_empty() {
            errors.push(CanvasError::InvalidTemplate(format!("{name} is empty")));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Geometry that will draw partly or wholly off a `width` x `height` surface.
pub fn bounds_warnings(template: &TemplateModel, width: u32, height: u32) -> Vec<String> {
    let mut warnings = Vec::new();
    let on_surface =
        |p: &Position| p.x >= 0 && p.y >= 0 && (p.x as u32) < width && (p.y as u32) < height;

    if !on_surface(&template.caption.position) {
        warnings.push(format!(
            "caption.position ({}, {}) is outside the {width}x{height} surface",
            template.caption.position.x, template.caption.position.y
        ));
    }
    if !on_surface(&template.cta.position) {
        warnings.push(format!(
            "cta.position ({}, {}) is outside the {width}x{height} surface",
            template.cta.position.x, template.cta.position.y
        ));
    }
    if template.image_mask.is_empty() {
        warnings.push("image_mask has zero area; mask and photo will not be drawn".into());
    } else if !template.image_mask.fits_within(width, height) {
        warnings.push(format!(
            "image_mask {:?} extends past the {width}x{height} surface",
            template.image_mask
        ));
    }

    warnings
}
