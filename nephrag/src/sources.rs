use nephrag_core::{DocumentSource, NephragError, SourceKind, SourceSet};

/// The built-in catalogue of Nephio and O-RAN SC documentation pages.
/// Runs that need a different mix start from this set and derive a new
/// one with `with_source` / `without_url`.
pub fn official_sources() -> Result<SourceSet, NephragError> {
    let sources = vec![
        DocumentSource::new(
            "https://docs.nephio.org/docs/",
            SourceKind::Nephio,
            "Nephio documentation home",
            1,
        )?,
        DocumentSource::new(
            "https://docs.nephio.org/docs/network-architecture/",
            SourceKind::Nephio,
            "Nephio network architecture",
            1,
        )?,
        DocumentSource::new(
            "https://docs.nephio.org/docs/guides/",
            SourceKind::Nephio,
            "Nephio user guides",
            2,
        )?,
        DocumentSource::new(
            "https://docs.nephio.org/docs/network-architecture/o-ran-integration/",
            SourceKind::Nephio,
            "Nephio O-RAN integration",
            2,
        )?,
        DocumentSource::new(
            "https://docs.o-ran-sc.org/en/latest/",
            SourceKind::OranSc,
            "O-RAN SC documentation portal",
            2,
        )?,
        DocumentSource::new(
            "https://docs.o-ran-sc.org/en/latest/architecture/architecture.html",
            SourceKind::OranSc,
            "O-RAN SC architecture overview",
            3,
        )?,
    ];

    Ok(SourceSet::new(sources))
}
