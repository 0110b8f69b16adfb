//! Desktop/mobile classification.

/// User-agent fragments that identify a phone or tablet.
const MOBILE_AGENTS: [&str; 4] = ["iphone", "ipad", "ipod", "android"];

/// How the crop surface takes input for the lifetime of one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionMode {
    Desktop,
    Mobile,
}

impl InteractionMode {
    /// Classify a device. Mobile if the user agent names a phone/tablet
    /// platform or the viewport is at most `breakpoint` pixels wide.
    pub fn detect(signal: &DeviceSignal, breakpoint: u32) -> Self {
        let mobile_agent = signal.user_agent.as_deref().is_some_and(|agent| {
            let agent = agent.to_ascii_lowercase();
            MOBILE_AGENTS.iter().any(|fragment| agent.contains(fragment))
        });
        let narrow = signal.viewport_width.is_some_and(|width| width <= breakpoint);

        if mobile_agent || narrow {
            InteractionMode::Mobile
        } else {
            InteractionMode::Desktop
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            InteractionMode::Desktop => "desktop",
            InteractionMode::Mobile => "mobile",
        }
    }
}

/// What the page knows about the device when the crop surface opens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceSignal {
    /// Viewport width in CSS pixels.
    pub viewport_width: Option<u32>,
    /// `navigator.userAgent`.
    pub user_agent: Option<String>,
}

impl DeviceSignal {
    pub fn new(viewport_width: Option<u32>, user_agent: Option<String>) -> Self {
        Self {
            viewport_width,
            user_agent,
        }
    }
}
