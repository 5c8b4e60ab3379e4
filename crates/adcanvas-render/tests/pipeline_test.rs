mod common;

use std::sync::Arc;

use adcanvas_core::{CanvasError, Color, FrameBuffer, FrameHash, Rect, TextAlign};
use adcanvas_ir::RenderState;
use adcanvas_render::layout::CTA_GAP;

use common::*;

const BACKGROUND: [u8; 4] = [3, 105, 161, 255];
const WHITE: [u8; 4] = [255, 255, 255, 255];
const BLACK: [u8; 4] = [0, 0, 0, 255];

fn in_opaque_mask(x: u32, y: u32) -> bool {
    (100..120).contains(&x) && (100..140).contains(&y)
}

#[tokio::test]
async fn test_layers_drawn_in_order() {
    let source = Arc::new(standard_source());
    let pipeline = pipeline_over(source.clone());
    let template = test_template();
    let state = RenderState::from_template(&template);

    let mut surface = FrameBuffer::new(SIZE, SIZE);
    let report = pipeline
        .render_into(&mut surface, &state, &template)
        .await
        .unwrap();

    assert_eq!(pixel(&surface, 5, 5), green().to_rgba8(), "design pattern");
    assert_eq!(pixel(&surface, 150, 20), BACKGROUND, "background");
    assert_eq!(pixel(&surface, 110, 110), WHITE, "mask artwork");
    assert_eq!(pixel(&surface, 130, 130), BACKGROUND, "transparent mask half");
    assert_eq!(pixel(&surface, 12, 35), WHITE, "first caption line");
    assert_eq!(pixel(&surface, 12, 55), WHITE, "second caption line");
    assert_eq!(pixel(&surface, 15, 135), yellow().to_rgba8(), "cta button");
    assert_eq!(pixel(&surface, 32, 158), BLACK, "cta label");

    assert_eq!(report.caption_lines, vec!["Hello", "world"]);
    assert_eq!(report.line_height, 20);
    assert_eq!(report.cta.rect, Rect::new(10, 60 + 2 * 20 + CTA_GAP, 50, 30));
    assert!(!report.photo_composited);
    assert_eq!(source.fetch_count("memory://stroke.png"), 0);
}

#[tokio::test]
async fn test_clear_discards_previous_frame() {
    let pipeline = pipeline_over(Arc::new(standard_source()));
    let template = test_template();
    let state = RenderState::from_template(&template);

    let mut surface = FrameBuffer::solid(SIZE, SIZE, &red());
    pipeline.render_into(&mut surface, &state, &template).await.unwrap();

    let mut fresh = FrameBuffer::new(SIZE, SIZE);
    pipeline.render_into(&mut fresh, &state, &template).await.unwrap();
    assert_eq!(surface, fresh);
}

#[tokio::test]
async fn test_photo_only_shows_through_opaque_mask() {
    let pipeline = pipeline_over(Arc::new(standard_source()));
    let template = test_template();
    let plain_state = RenderState::from_template(&template);
    let photo = Arc::new(FrameBuffer::solid(64, 32, &red()));
    let photo_state = plain_state.clone().with_uploaded_image(photo);

    let mut plain = FrameBuffer::new(SIZE, SIZE);
    pipeline.render_into(&mut plain, &plain_state, &template).await.unwrap();
    let mut with_photo = FrameBuffer::new(SIZE, SIZE);
    let report = pipeline
        .render_into(&mut with_photo, &photo_state, &template)
        .await
        .unwrap();

    assert!(report.photo_composited);
    assert_eq!(pixel(&with_photo, 110, 120), red().to_rgba8());
    assert_eq!(pixel(&with_photo, 130, 120), BACKGROUND);

    for y in 0..SIZE {
        for x in 0..SIZE {
            if !in_opaque_mask(x, y) {
                assert_eq!(
                    pixel(&with_photo, x, y),
                    pixel(&plain, x, y),
                    "pixel ({x}, {y}) outside the mask changed"
                );
            }
        }
    }
}

#[tokio::test]
async fn test_cta_moves_down_one_line_per_caption_line() {
    let pipeline = pipeline_over(Arc::new(standard_source()));
    let template = test_template();

    let mut surface = FrameBuffer::new(SIZE, SIZE);
    let one = pipeline
        .render_into(
            &mut surface,
            &RenderState::from_template(&template).with_caption("Hi"),
            &template,
        )
        .await
        .unwrap();
    let two = pipeline
        .render_into(&mut surface, &RenderState::from_template(&template), &template)
        .await
        .unwrap();

    assert_eq!(one.caption_lines.len(), 1);
    assert_eq!(two.caption_lines.len(), 2);
    assert_eq!(two.cta.rect.y - one.cta.rect.y, one.line_height);
}

#[tokio::test]
async fn test_cta_label_follows_caption_alignment() {
    let pipeline = pipeline_over(Arc::new(standard_source()));
    let mut template = test_template();
    let state = RenderState::from_template(&template);

    let mut left = FrameBuffer::new(SIZE, SIZE);
    pipeline.render_into(&mut left, &state, &template).await.unwrap();
    assert_eq!(pixel(&left, 22, 158), yellow().to_rgba8());

    template.caption.alignment = TextAlign::Right;
    let mut right = FrameBuffer::new(SIZE, SIZE);
    pipeline.render_into(&mut right, &state, &template).await.unwrap();
    // The label now ends at its anchor x = 30.
    assert_eq!(pixel(&right, 22, 158), BLACK);
    assert_eq!(pixel(&right, 32, 158), yellow().to_rgba8());
}

#[tokio::test]
async fn test_far_off_surface_text_draws_nothing() {
    let pipeline = pipeline_over(Arc::new(standard_source()));
    let state = RenderState::from_template(&test_template());

    for (caption_y, cta_y) in [(i32::MAX - 5, i32::MAX - 10), (i32::MIN, i32::MIN + 1)] {
        let mut template = test_template();
        template.caption.position.y = caption_y;
        template.cta.position.y = cta_y;

        let mut surface = FrameBuffer::new(SIZE, SIZE);
        let report = pipeline
            .render_into(&mut surface, &state, &template)
            .await
            .unwrap();

        assert_eq!(report.caption_lines.len(), 2);
        assert_eq!(pixel(&surface, 12, 35), BACKGROUND);
        assert_eq!(pixel(&surface, 15, 135), BACKGROUND);
        assert_eq!(pixel(&surface, 110, 110), WHITE, "mask still drawn");
    }
}

#[tokio::test]
async fn test_identical_inputs_hash_identically() {
    let source = Arc::new(standard_source());
    let pipeline = pipeline_over(source.clone());
    let template = test_template();
    let state = RenderState::from_template(&template)
        .with_background(Color::from_rgb8(17, 24, 39))
        .with_uploaded_image(Arc::new(FrameBuffer::solid(40, 40, &red())));

    let mut a = FrameBuffer::new(SIZE, SIZE);
    let mut b = FrameBuffer::new(SIZE, SIZE);
    pipeline.render_into(&mut a, &state, &template).await.unwrap();
    pipeline.render_into(&mut b, &state, &template).await.unwrap();

    assert_eq!(FrameHash::of(&a), FrameHash::of(&b));
    assert_eq!(source.fetch_count(PATTERN_URL), 1, "assets are cached across passes");
    assert_eq!(source.fetch_count(MASK_URL), 1);
}

#[tokio::test]
async fn test_missing_mask_keeps_partial_frame() {
    let pipeline = pipeline_over(Arc::new(standard_source()));
    let mut template = test_template();
    template.urls.mask = MISSING_URL.to_string();
    let state = RenderState::from_template(&template);

    let mut surface = FrameBuffer::new(SIZE, SIZE);
    let err = pipeline
        .render_into(&mut surface, &state, &template)
        .await
        .unwrap_err();

    match err {
        CanvasError::AssetFetch { url, source } => {
            assert_eq!(url, MISSING_URL);
            assert!(source.to_string().contains("404"));
        }
        other => panic!("expected fetch error, got {other:?}"),
    }
    assert_eq!(pixel(&surface, 5, 5), green().to_rgba8());
    assert_eq!(pixel(&surface, 110, 110), BACKGROUND);
    assert_eq!(pixel(&surface, 12, 35), BACKGROUND, "caption is never reached");
}

#[tokio::test]
async fn test_empty_mask_rect_still_loads_mask() {
    let source = Arc::new(standard_source());
    let pipeline = pipeline_over(source.clone());
    let mut template = test_template();
    template.image_mask = Rect::new(100, 100, 0, 40);
    let state = RenderState::from_template(&template)
        .with_uploaded_image(Arc::new(FrameBuffer::solid(40, 40, &red())));

    let mut surface = FrameBuffer::new(SIZE, SIZE);
    let report = pipeline
        .render_into(&mut surface, &state, &template)
        .await
        .unwrap();

    assert_eq!(source.fetch_count(MASK_URL), 1);
    assert!(!report.photo_composited);
    assert_eq!(pixel(&surface, 110, 110), BACKGROUND);
}
