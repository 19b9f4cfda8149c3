//! Steering modes and the environment snapshot they track against

/// External inputs for one steering tick (degrees)
///
/// Supplied by the caller every tick: heading from the orientation estimate,
/// course over ground from GPS, apparent wind direction from the wind sensor.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EnvironmentData {
    pub heading: f32,
    pub course: f32,
    pub wind_direction: f32,
}

impl EnvironmentData {
    pub fn new(heading: f32, course: f32, wind_direction: f32) -> Self {
        Self {
            heading,
            course,
            wind_direction,
        }
    }
}

/// Active steering strategy with its parameter
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum SteeringMode {
    /// Rudder centered, no control
    #[default]
    Off,
    /// Hold a compass heading (degrees)
    TrackHeading(f32),
    /// Hold a course over ground (degrees)
    TrackCourse(f32),
    /// Hold an apparent wind direction (degrees)
    TrackWindAngle(f32),
    /// Hold the rudder at a fixed angle (degrees), open loop
    RudderLock(f32),
    /// Calibration placeholders; no rudder computation
    CalibratePid,
    CalibrateThreshold,
    CalibrateImu,
}

/// Payload-free discriminant of [`SteeringMode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SteeringModeKind {
    Off,
    TrackHeading,
    TrackCourse,
    TrackWindAngle,
    RudderLock,
    CalibratePid,
    CalibrateThreshold,
    CalibrateImu,
}

impl SteeringMode {
    /// Build a mode from its kind and parameter
    ///
    /// `param` is ignored by modes without a payload.
    pub fn from_kind(kind: SteeringModeKind, param: f32) -> Self {
        match kind {
            SteeringModeKind::Off => SteeringMode::Off,
            SteeringModeKind::TrackHeading => SteeringMode::TrackHeading(param),
            SteeringModeKind::TrackCourse => SteeringMode::TrackCourse(param),
            SteeringModeKind::TrackWindAngle => SteeringMode::TrackWindAngle(param),
            SteeringModeKind::RudderLock => SteeringMode::RudderLock(param),
            SteeringModeKind::CalibratePid => SteeringMode::CalibratePid,
            SteeringModeKind::CalibrateThreshold => SteeringMode::CalibrateThreshold,
            SteeringModeKind::CalibrateImu => SteeringMode::CalibrateImu,
        }
    }

    pub fn kind(&self) -> SteeringModeKind {
        match self {
            SteeringMode::Off => SteeringModeKind::Off,
            SteeringMode::TrackHeading(_) => SteeringModeKind::TrackHeading,
            SteeringMode::TrackCourse(_) => SteeringModeKind::TrackCourse,
            SteeringMode::TrackWindAngle(_) => SteeringModeKind::TrackWindAngle,
            SteeringMode::RudderLock(_) => SteeringModeKind::RudderLock,
            SteeringMode::CalibratePid => SteeringModeKind::CalibratePid,
            SteeringMode::CalibrateThreshold => SteeringModeKind::CalibrateThreshold,
            SteeringMode::CalibrateImu => SteeringModeKind::CalibrateImu,
        }
    }

    /// Setpoint of a tracking mode
    pub fn setpoint(&self) -> Option<f32> {
        match self {
            SteeringMode::TrackHeading(sp)
            | SteeringMode::TrackCourse(sp)
            | SteeringMode::TrackWindAngle(sp) => Some(*sp),
            _ => None,
        }
    }

    pub fn is_tracking(&self) -> bool {
        self.setpoint().is_some()
    }

    /// Get mode name for logging
    pub fn name(&self) -> &'static str {
        self.kind().name()
    }
}

impl SteeringModeKind {
    pub fn name(&self) -> &'static str {
        match self {
            SteeringModeKind::Off => "Off",
            SteeringModeKind::TrackHeading => "Heading",
            SteeringModeKind::TrackCourse => "Course",
            SteeringModeKind::TrackWindAngle => "Wind",
            SteeringModeKind::RudderLock => "RudderLock",
            SteeringModeKind::CalibratePid => "CalPid",
            SteeringModeKind::CalibrateThreshold => "CalThreshold",
            SteeringModeKind::CalibrateImu => "CalImu",
        }
    }
}
