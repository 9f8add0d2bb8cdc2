use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::util::easing::EasingFunction;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Focus", inline)]
#[serde(default)]
/// Camera fly-to timing.
pub struct FocusOptions {
    /// Length of a fly-to in seconds.
    #[schemars(title = "Flight Duration", range(min = 0.0, max = 10.0), extend("step" = 0.1))]
    pub duration_secs: f32,
    /// Curve applied to flight progress.
    #[schemars(skip)]
    pub easing: EasingFunction,
}

impl Default for FocusOptions {
    fn default() -> Self {
        Self {
            duration_secs: 2.0,
            easing: EasingFunction::DEFAULT,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Intro", inline)]
#[serde(default)]
/// One-off flight played shortly after start-up.
pub struct IntroOptions {
    /// Building to fly to, using its own focus offset. `None` disables the
    /// intro.
    #[schemars(skip)]
    pub building: Option<String>,
    /// Seconds to wait after start-up.
    #[schemars(title = "Intro Delay", range(min = 0.0, max = 30.0), extend("step" = 0.5))]
    pub delay_secs: f32,
    /// Length of the intro flight in seconds.
    #[schemars(title = "Intro Duration", range(min = 0.0, max = 10.0), extend("step" = 0.1))]
    pub duration_secs: f32,
}

impl Default for IntroOptions {
    fn default() -> Self {
        Self {
            building: Some("rst".to_owned()),
            delay_secs: 5.0,
            duration_secs: 3.0,
        }
    }
}
