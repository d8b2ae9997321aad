use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use log::debug;

// @module: Caption variant detection and redundant-file collapse

/// Which flavour of a caption track a file represents, resolved once from the
/// filename suffix so the collapse rules never compare raw strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantKind {
    /// Originally-authored track (`<base>.<lang>-orig.srt`); authoritative
    Original,
    /// Default track yt-dlp writes (`<base>.<lang>.srt`)
    Default,
    /// Duplicate of the default track (`<base>.<lang>-<lang>.srt`); never kept
    /// when siblings exist
    DefaultDuplicate,
}

/// One caption file with its variant resolved at ingestion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptionVariant {
    /// Path as supplied by the caller
    pub path: PathBuf,
    /// Logical base name with the variant suffix stripped
    pub base: String,
    /// Resolved variant kind
    pub kind: VariantKind,
}

impl CaptionVariant {
    /// Resolve a path into a variant for the given language tag. Files whose
    /// name does not carry a recognized variant suffix resolve to `None` and
    /// are never compared to anything.
    pub fn resolve<P: AsRef<Path>>(path: P, language: &str) -> Option<Self> {
        let path = path.as_ref();
        let file_name = path.file_name()?.to_str()?;

        let duplicate_suffix = format!(".{lang}-{lang}.srt", lang = language);
        let original_suffix = format!(".{}-orig.srt", language);
        let default_suffix = format!(".{}.srt", language);

        // Duplicate first: its suffix overlaps the default pattern family
        let (base, kind) = if let Some(base) = file_name.strip_suffix(&duplicate_suffix) {
            (base, VariantKind::DefaultDuplicate)
        } else if let Some(base) = file_name.strip_suffix(&original_suffix) {
            (base, VariantKind::Original)
        } else if let Some(base) = file_name.strip_suffix(&default_suffix) {
            (base, VariantKind::Default)
        } else {
            return None;
        };

        Some(CaptionVariant {
            path: path.to_path_buf(),
            base: base.to_string(),
            kind,
        })
    }
}

/// The outcome of a variant collapse: which files survive and which are
/// designated for deletion. The plan is pure data; storage is touched by the
/// caller, not here.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CollapsePlan {
    /// Files to keep, grouped by base name in deterministic order
    pub keep: Vec<PathBuf>,
    /// Files designated for deletion, grouped by base name in deterministic order
    pub delete: Vec<PathBuf>,
}

/// Collapse redundant caption variants for the given language down to one
/// authoritative file per base name.
///
/// Within a group of two or more files sharing a base name:
/// duplicate-of-default variants are always dropped, and the default variant
/// is dropped whenever an original variant exists. A base name with only one
/// file keeps it unconditionally, whatever its variant. Files without a
/// recognized variant suffix pass through untouched.
pub fn collapse_variants<P: AsRef<Path>>(files: &[P], language: &str) -> CollapsePlan {
    let mut plan = CollapsePlan::default();
    let mut groups: BTreeMap<String, Vec<CaptionVariant>> = BTreeMap::new();

    for file in files {
        match CaptionVariant::resolve(file, language) {
            Some(variant) => {
                groups.entry(variant.base.clone()).or_default().push(variant);
            }
            None => plan.keep.push(file.as_ref().to_path_buf()),
        }
    }

    for (base, group) in &groups {
        if group.len() <= 1 {
            // A lone variant is authoritative by default
            plan.keep.extend(group.iter().map(|v| v.path.clone()));
            continue;
        }

        let has_original = group.iter().any(|v| v.kind == VariantKind::Original);

        for variant in group {
            let drop = match variant.kind {
                VariantKind::DefaultDuplicate => true,
                VariantKind::Default => has_original,
                VariantKind::Original => false,
            };
            if drop {
                debug!("Dropping redundant caption variant for '{}': {:?}", base, variant.path);
                plan.delete.push(variant.path.clone());
            } else {
                plan.keep.push(variant.path.clone());
            }
        }
    }

    plan
}
