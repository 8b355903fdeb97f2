//! Tests for progress display bookkeeping

#[cfg(test)]
mod tests {
    use mrf_inpaint::io::progress::ProgressManager;
    use std::path::Path;
    use std::time::Duration;

    // Tests the full lifecycle for a multi-file batch without panicking
    // Verified by unwrapping the epoch bar when none was started
    #[test]
    fn test_batch_lifecycle() {
        let mut manager = ProgressManager::new();
        manager.initialize(2);

        for name in ["a.png", "b.png"] {
            manager.start_file(Path::new(name), 3);
            for _ in 0..3 {
                for position in 1..=450 {
                    manager.update_sweep(position, 450);
                }
                manager.complete_epoch();
            }
            manager.complete_file(Duration::from_millis(120));
        }
        manager.finish();
    }

    #[test]
    fn test_updates_without_file_are_ignored() {
        let mut manager = ProgressManager::default();
        manager.initialize(1);

        manager.update_sweep(1, 1);
        manager.complete_epoch();
        manager.complete_file(Duration::ZERO);
        manager.finish();
    }
}
