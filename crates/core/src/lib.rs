pub mod shared {
    pub mod constants;
    pub mod frame;
    pub mod point;
    pub mod region;
    pub mod tracker_config;
}

pub mod control {
    pub mod domain {
        pub mod controller_state;
        pub mod dispatch_policy;
        pub mod measurement;
        pub mod pan_tilt_controller;
    }
}

pub mod detection {
    pub mod domain {
        pub mod face_detector;
        pub mod facing;
        pub mod pose_estimator;
    }
    pub mod infrastructure;
}

pub mod capture {
    pub mod domain {
        pub mod frame_source;
    }
    pub mod infrastructure;
}

pub mod actuation {
    pub mod domain {
        pub mod servo_actuator;
    }
    pub mod infrastructure;
}

pub mod reporting {
    pub mod domain {
        pub mod commander_link;
    }
    pub mod infrastructure;
}

pub mod pipeline {
    pub mod track_faces_use_case;
    pub mod tracking_logger;
}
