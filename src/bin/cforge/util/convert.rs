use colloid_forge::ReagentSet;

use crate::cli::ReagentPreset;

impl From<ReagentPreset> for ReagentSet {
    fn from(preset: ReagentPreset) -> Self {
        match preset {
            ReagentPreset::Full => ReagentSet::FULL,
            ReagentPreset::DnaPeg => ReagentSet::DNA_PEG,
            ReagentPreset::Particles => ReagentSet::PARTICLES_ONLY,
        }
    }
}

pub fn reagent_preset_name(preset: ReagentPreset) -> &'static str {
    match preset {
        ReagentPreset::Full => "DNA + PEG + streptavidin + crosslinker",
        ReagentPreset::DnaPeg => "DNA + PEG",
        ReagentPreset::Particles => "particles only",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_map_to_reagent_sets() {
        assert_eq!(ReagentSet::from(ReagentPreset::Full), ReagentSet::FULL);
        assert_eq!(ReagentSet::from(ReagentPreset::DnaPeg), ReagentSet::DNA_PEG);
        assert!(ReagentSet::from(ReagentPreset::Particles).is_empty());
    }
}
