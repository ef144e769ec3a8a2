//! Number plate recognition seam.

use rand::Rng;

/// Opaque recognition collaborator.
///
/// Whatever comes back is untrusted input text; callers must treat it
/// like any user-supplied plate string.
pub trait PlateRecognizer: Send + Sync {
    /// Extract a plate string from the image at `image_path`, or `None`
    /// when nothing was recognized.
    fn recognize(&self, image_path: &str) -> Option<String>;
}

/// Simulated recognizer that fabricates a syntactically plausible plate
/// in the `KA-dd-AA-dddd` format.
#[derive(Debug, Clone, Default)]
pub struct SimulatedRecognizer;

impl PlateRecognizer for SimulatedRecognizer {
    fn recognize(&self, _image_path: &str) -> Option<String> {
        let mut rng = rand::thread_rng();

        let district: u32 = rng.gen_range(1..=99);
        let series: String = (0..2)
            .map(|_| char::from(b'A' + rng.gen_range(0..26u8)))
            .collect();
        let number: u32 = rng.gen_range(1000..=9999);

        Some(format!("KA-{district:02}-{series}-{number}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulated_plate_shape() {
        let plate = SimulatedRecognizer.recognize("ignored.jpg").unwrap();
        let parts: Vec<&str> = plate.split('-').collect();
        assert_eq!(parts.len(), 4);
        assert_eq!(parts[0], "KA");
        assert_eq!(parts[1].len(), 2);
        assert_eq!(parts[2].len(), 2);
        assert_eq!(parts[3].len(), 4);
    }
}
