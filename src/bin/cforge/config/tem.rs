use colloid_forge::TemConfig;

use crate::cli::TemArgs;

pub fn build_tem_config(args: &TemArgs) -> TemConfig {
    TemConfig {
        strict_pairing: args.strict_pairing,
    }
}
