//! Factory patches bundled with the nco library.
//!
//! These patches are always available without external files and cover each
//! waveform at least once.

use crate::Patch;

/// Array of factory patch names for external access.
pub static FACTORY_PATCH_NAMES: &[&str] = &[
    "init",
    "soft_pad",
    "pluck",
    "organ",
    "chip_lead",
    "noise_burst",
];

/// TOML content for factory patches, embedded at compile time.
static FACTORY_PATCHES_TOML: &[(&str, &str)] = &[
    ("init", INIT_PATCH),
    ("soft_pad", SOFT_PAD_PATCH),
    ("pluck", PLUCK_PATCH),
    ("organ", ORGAN_PATCH),
    ("chip_lead", CHIP_LEAD_PATCH),
    ("noise_burst", NOISE_BURST_PATCH),
];

/// Initialization patch - engine defaults.
const INIT_PATCH: &str = r#"
name = "Init"
description = "Engine defaults: triangle, 4 Hz detune, short envelope"
"#;

/// Slow triangle pad.
const SOFT_PAD_PATCH: &str = r#"
name = "Soft Pad"
description = "Slow-swelling triangle pad with gentle beating"
waveform = "triangle"
detune = 1.5

[envelope]
attack = 0.8
decay = 0.4
sustain = 0.7
release = 1.5
"#;

/// Plucked sawtooth.
const PLUCK_PATCH: &str = r#"
name = "Pluck"
description = "Percussive sawtooth with no sustain"
waveform = "sawtooth"
detune = 3.0

[envelope]
attack = 0.0
decay = 0.25
sustain = 0.0
release = 0.1
"#;

/// Organ-style sine.
const ORGAN_PATCH: &str = r#"
name = "Organ"
description = "Gated sine with a slow chorus beat"
waveform = "sine"
detune = 0.5

[envelope]
attack = 0.005
decay = 0.0
sustain = 1.0
release = 0.02
"#;

/// Square lead.
const CHIP_LEAD_PATCH: &str = r#"
name = "Chip Lead"
description = "Bright square lead with a wide detune"
waveform = "square"
detune = 6.0

[envelope]
attack = 0.002
decay = 0.15
sustain = 0.6
release = 0.08
"#;

/// Noise hit.
const NOISE_BURST_PATCH: &str = r#"
name = "Noise Burst"
description = "Short noise hit for percussion"
waveform = "noise"

[envelope]
attack = 0.0
decay = 0.08
sustain = 0.0
release = 0.05
"#;

/// Get all factory patches.
///
/// # Example
///
/// ```rust
/// use nco_config::factory_patches;
///
/// let patches = factory_patches();
/// assert_eq!(patches.len(), 6);
/// ```
pub fn factory_patches() -> Vec<Patch> {
    FACTORY_PATCHES_TOML
        .iter()
        .filter_map(|(_, toml)| Patch::from_toml(toml).ok())
        .collect()
}

/// Get a factory patch by internal or display name, case-insensitively.
///
/// # Example
///
/// ```rust
/// use nco_config::get_factory_patch;
///
/// let pad = get_factory_patch("soft_pad").unwrap();
/// assert_eq!(pad.name, "Soft Pad");
/// assert_eq!(get_factory_patch("Soft Pad"), Some(pad));
/// ```
pub fn get_factory_patch(name: &str) -> Option<Patch> {
    FACTORY_PATCHES_TOML
        .iter()
        .filter_map(|(id, toml)| Some((*id, Patch::from_toml(toml).ok()?)))
        .find(|(id, patch)| {
            id.eq_ignore_ascii_case(name) || patch.name.eq_ignore_ascii_case(name)
        })
        .map(|(_, patch)| patch)
}

/// Check if a name refers to a factory patch.
pub fn is_factory_patch(name: &str) -> bool {
    get_factory_patch(name).is_some()
}
