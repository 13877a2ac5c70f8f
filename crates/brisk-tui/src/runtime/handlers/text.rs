use brisk_core::data;

/// Size of the index sample shuffled by each debounced action.
const SAMPLE_LEN: usize = 100;

/// The debounced text action: logs the settled value with a fresh shuffle.
pub fn process_text(value: &str) {
    let sample = data::shuffled_indices(&mut rand::rng(), SAMPLE_LEN);
    tracing::info!(
        value,
        chars = value.chars().count(),
        sample = ?&sample[..sample.len().min(10)],
        "processing debounced text"
    );
}
