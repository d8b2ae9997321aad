/*!
 * Tests for caption variant detection and collapse planning
 */

use std::path::PathBuf;
use capalign::variant_collapse::{collapse_variants, CaptionVariant, VariantKind};

/// Test variant resolution from filename suffixes
#[test]
fn test_variant_resolve_withAllSuffixes_shouldDetectKinds() {
    let orig = CaptionVariant::resolve("video.en-orig.srt", "en").unwrap();
    assert_eq!(orig.kind, VariantKind::Original);
    assert_eq!(orig.base, "video");

    let default = CaptionVariant::resolve("video.en.srt", "en").unwrap();
    assert_eq!(default.kind, VariantKind::Default);
    assert_eq!(default.base, "video");

    let duplicate = CaptionVariant::resolve("video.en-en.srt", "en").unwrap();
    assert_eq!(duplicate.kind, VariantKind::DefaultDuplicate);
    assert_eq!(duplicate.base, "video");
}

/// Test that unrelated filenames do not resolve to a variant
#[test]
fn test_variant_resolve_withUnrecognizedSuffix_shouldReturnNone() {
    assert!(CaptionVariant::resolve("video.fr.srt", "en").is_none());
    assert!(CaptionVariant::resolve("video.srt", "en").is_none());
    assert!(CaptionVariant::resolve("video.en.txt", "en").is_none());
}

/// Test variant resolution for a non-English language tag
#[test]
fn test_variant_resolve_withOtherLanguage_shouldUseLanguageTag() {
    let orig = CaptionVariant::resolve("show.ko-orig.srt", "ko").unwrap();
    assert_eq!(orig.kind, VariantKind::Original);

    let duplicate = CaptionVariant::resolve("show.ko-ko.srt", "ko").unwrap();
    assert_eq!(duplicate.kind, VariantKind::DefaultDuplicate);
}

/// Test the full collapse with all three variants present
#[test]
fn test_collapse_variants_withAllThreeVariants_shouldKeepOnlyOriginal() {
    let files = [
        PathBuf::from("video.en-orig.srt"),
        PathBuf::from("video.en.srt"),
        PathBuf::from("video.en-en.srt"),
    ];
    let plan = collapse_variants(&files, "en");

    assert_eq!(plan.keep, vec![PathBuf::from("video.en-orig.srt")]);
    assert_eq!(plan.delete.len(), 2);
    assert!(plan.delete.contains(&PathBuf::from("video.en.srt")));
    assert!(plan.delete.contains(&PathBuf::from("video.en-en.srt")));
}

/// Test collapse without an original track present
#[test]
fn test_collapse_variants_withoutOriginal_shouldKeepDefault() {
    let files = [
        PathBuf::from("video.en.srt"),
        PathBuf::from("video.en-en.srt"),
    ];
    let plan = collapse_variants(&files, "en");

    assert_eq!(plan.keep, vec![PathBuf::from("video.en.srt")]);
    assert_eq!(plan.delete, vec![PathBuf::from("video.en-en.srt")]);
}

/// Test that a lone file is kept whatever its variant
#[test]
fn test_collapse_variants_withLoneDuplicate_shouldKeepIt() {
    let files = [PathBuf::from("video.en-en.srt")];
    let plan = collapse_variants(&files, "en");

    assert_eq!(plan.keep, vec![PathBuf::from("video.en-en.srt")]);
    assert!(plan.delete.is_empty());
}

/// Test that files with different base names are never compared
#[test]
fn test_collapse_variants_withDifferentBases_shouldNotCrossCompare() {
    let files = [
        PathBuf::from("alpha.en.srt"),
        PathBuf::from("beta.en-orig.srt"),
    ];
    let plan = collapse_variants(&files, "en");

    assert_eq!(plan.keep.len(), 2);
    assert!(plan.delete.is_empty());
}

/// Test that unrecognized files pass through untouched
#[test]
fn test_collapse_variants_withUnrecognizedFiles_shouldPassThrough() {
    let files = [
        PathBuf::from("notes.txt"),
        PathBuf::from("video.en-orig.srt"),
        PathBuf::from("video.en.srt"),
    ];
    let plan = collapse_variants(&files, "en");

    assert!(plan.keep.contains(&PathBuf::from("notes.txt")));
    assert!(plan.keep.contains(&PathBuf::from("video.en-orig.srt")));
    assert_eq!(plan.delete, vec![PathBuf::from("video.en.srt")]);
}

/// Test that empty input produces an empty plan
#[test]
fn test_collapse_variants_withNoFiles_shouldReturnEmptyPlan() {
    let files: [PathBuf; 0] = [];
    let plan = collapse_variants(&files, "en");

    assert!(plan.keep.is_empty());
    assert!(plan.delete.is_empty());
}
