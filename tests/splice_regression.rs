//! Exact-output regression for the splice pipeline
//!
//! The deterministic renderer makes whole-document output reproducible, so
//! these tests pin the exact serialized result: glyph metrics, transform
//! composition, attribute order, and namespace round-tripping all have to
//! hold at once. Neither text element carries a font-size, so the 16px
//! computed default feeds the scale.

use futures::executor::block_on;
use pretty_assertions::assert_eq;

use mathsplice::{process_document, DeterministicMathRenderer};

#[test]
fn test_exact_output_for_centered_math() {
    let input = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 60 30"><text x="30" y="15">$ab$</text></svg>"#;

    let out = block_on(process_document(input, DeterministicMathRenderer::new())).unwrap();

    // Glyph: 2 chars * 8 = 16 wide, 16 tall. Scale: 0.09 * 16 = 1.44.
    // Centered: x offset -16*0.5*1.44 = -11.52, baseline -16*1.44 = -23.04.
    assert_eq!(
        out,
        concat!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 60 30">"#,
            r#"<svg class="math-glyph" width="16" height="16" viewBox="0 0 16 16" "#,
            r#"transform="translate(30 15) translate(-11.52 -23.04) scale(1.44)">"#,
            r#"<text x="0" y="12.8" font-style="italic">ab</text>"#,
            r#"</svg></svg>"#
        )
    );
}

#[test]
fn test_exact_output_for_right_justified_math() {
    let input = r#"<svg viewBox="0 0 60 30"><text x="60" y="30">R$abcd$</text></svg>"#;

    let out = block_on(process_document(input, DeterministicMathRenderer::new())).unwrap();

    // 4 chars * 8 = 32 wide; right-justified offset is the full scaled width
    assert_eq!(
        out,
        concat!(
            r#"<svg viewBox="0 0 60 30">"#,
            r#"<svg class="math-glyph" width="32" height="16" viewBox="0 0 32 16" "#,
            r#"transform="translate(60 30) translate(-46.08 -23.04) scale(1.44)">"#,
            r#"<text x="0" y="12.8" font-style="italic">abcd</text>"#,
            r#"</svg></svg>"#
        )
    );
}
