//! Tests for error formatting, sources and conversions

#[cfg(test)]
mod tests {
    use mrf_inpaint::InpaintError;
    use mrf_inpaint::graph::NodeId;
    use mrf_inpaint::io::error::{computation_error, invalid_parameter, topology_violation};
    use std::error::Error;
    use std::path::PathBuf;

    #[test]
    fn test_helper_messages() {
        let error = invalid_parameter("epochs", &"abc", &"must be a number");
        assert_eq!(
            error.to_string(),
            "Invalid parameter 'epochs' = 'abc': must be a number"
        );

        let error = computation_error("normalization", &"normalizer is NaN");
        assert_eq!(
            error.to_string(),
            "Computation error in normalization: normalizer is NaN"
        );

        let error = topology_violation(NodeId(12), &"v3 is not a neighbor");
        assert_eq!(
            error.to_string(),
            "Topology violation at node v12: v3 is not a neighbor"
        );
    }

    #[test]
    fn test_uninitialized_names_node() {
        let error = InpaintError::Uninitialized { node: NodeId(4) };
        assert!(error.to_string().contains("v4"));
        assert!(error.source().is_none());
    }

    // Tests wrapped I/O failures keep their cause
    // Verified by returning None from source()
    #[test]
    fn test_file_system_source_chain() {
        let error = InpaintError::FileSystem {
            path: PathBuf::from("/tmp/out"),
            operation: "create directory",
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };

        assert!(error.to_string().contains("create directory"));
        assert!(error.to_string().contains("/tmp/out"));
        assert_eq!(error.source().map(ToString::to_string), Some("denied".to_string()));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let error = InpaintError::from(io_error);

        assert!(matches!(error, InpaintError::FileSystem { .. }));
        assert!(error.source().is_some());
    }
}
