use std::path::PathBuf;

/// Properties of a frame source, known once it is opened.
#[derive(Clone, Debug, PartialEq)]
pub struct SourceMetadata {
    pub width: u32,
    pub height: u32,
    /// Nominal capture rate used to stamp frames.
    pub fps: f64,
    pub total_frames: usize,
    pub source_path: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction() {
        let meta = SourceMetadata {
            width: 640,
            height: 480,
            fps: 15.0,
            total_frames: 120,
            source_path: Some(PathBuf::from("/tmp/frames")),
        };
        assert_eq!(meta.width, 640);
        assert_eq!(meta.height, 480);
        assert_eq!(meta.fps, 15.0);
        assert_eq!(meta.total_frames, 120);
        assert_eq!(meta.source_path, Some(PathBuf::from("/tmp/frames")));
    }

    #[test]
    fn test_clone_is_independent() {
        let meta = SourceMetadata {
            width: 320,
            height: 240,
            fps: 8.0,
            total_frames: 1,
            source_path: None,
        };
        assert_eq!(meta.clone(), meta);
    }
}
