use log::warn;

use super::error::Error;
use crate::model::tem::Measurement;

/// Pairs measurement sizes positionally into particles.
///
/// Even positions are lengths and odd positions are widths; the *i*-th length
/// pairs with the *i*-th width. A trailing length without a width yields a
/// particle whose width and aspect ratio are absent, unless `strict` is set.
pub fn pair(sizes: &[f64], strict: bool) -> Result<Vec<Measurement>, Error> {
    if sizes.len() % 2 != 0 {
        if strict {
            return Err(Error::UnpairedMeasurement { count: sizes.len() });
        }
        warn!(
            "{} measurement rows is odd; the last length has no width",
            sizes.len()
        );
    }

    Ok(sizes
        .chunks(2)
        .map(|pair| Measurement::new(Some(pair[0]), pair.get(1).copied()))
        .collect())
}
