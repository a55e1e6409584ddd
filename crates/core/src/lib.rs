//! Hand proximity alerting: skin segmentation, hand extraction, centroid
//! tracking and boundary classification over a stream of frames.

pub mod shared {
    pub mod config;
    pub mod constants;
    pub mod frame;
    pub mod frame_report;
    pub mod geometry;
    pub mod mask;
    pub mod source_metadata;
}

pub mod segmentation {
    pub mod domain {
        pub mod segmenter;
    }
    pub mod infrastructure;
}

pub mod detection {
    pub mod domain {
        pub mod hand_candidate;
        pub mod hand_extractor;
    }
    pub mod infrastructure;
}

pub mod tracking {
    pub mod domain {
        pub mod centroid_tracker;
    }
}

pub mod boundary {
    pub mod domain {
        pub mod boundary;
        pub mod boundary_evaluator;
        pub mod boundary_state;
    }
}

pub mod video {
    pub mod domain {
        pub mod debug_sink;
        pub mod frame_source;
    }
    pub mod infrastructure;
}

pub mod pipeline {
    pub mod fps_meter;
    pub mod frame_pipeline;
    pub mod pipeline_logger;
}
