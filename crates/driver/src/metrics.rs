use metrics::{counter, gauge};

#[derive(Debug, Clone, Copy)]
pub(crate) struct DriverMetrics;

impl DriverMetrics {
    // ================ L1 SIGNALS ================ //

    /// Sets the latest L1 head block number signalled to the driver.
    pub(crate) fn set_l1_head(value: u64) {
        counter!("driver_l1_head_number").absolute(value);
    }

    /// Sets the latest safe L1 block number signalled to the driver.
    pub(crate) fn set_l1_safe(value: u64) {
        counter!("driver_l1_safe_number").absolute(value);
    }

    /// Sets the latest finalized L1 block number signalled to the driver.
    pub(crate) fn set_l1_finalized(value: u64) {
        counter!("driver_l1_finalized_number").absolute(value);
    }

    /// Increments the amount of L1 reorgs observed through head signals.
    pub(crate) fn increment_l1_reorgs(old_head: u64, new_head: u64) {
        counter!(
            "driver_l1_reorgs",
            "old_head" => old_head.to_string(),
            "new_head" => new_head.to_string()
        )
        .increment(1);
    }

    // ================ DERIVATION ================ //

    /// Sets whether the derivation pipeline is idle, waiting for new L1 data.
    pub(crate) fn set_derivation_idle(idle: bool) {
        gauge!("driver_derivation_idle").set(if idle { 1.0 } else { 0.0 });
    }

    /// Sets the number of consecutive failed derivation step attempts.
    pub(crate) fn set_step_attempts(value: u32) {
        gauge!("driver_step_attempts").set(f64::from(value));
    }

    /// Increments the amount of derivation pipeline resets.
    pub(crate) fn increment_pipeline_resets() {
        counter!("driver_pipeline_resets").increment(1);
    }

    /// Sets the unsafe L2 head block number.
    pub(crate) fn set_unsafe_l2_head(value: u64) {
        counter!("driver_unsafe_l2_head_number").absolute(value);
    }

    /// Sets the safe L2 head block number.
    pub(crate) fn set_safe_l2_head(value: u64) {
        counter!("driver_safe_l2_head_number").absolute(value);
    }

    /// Sets the finalized L2 head block number.
    pub(crate) fn set_finalized_l2_head(value: u64) {
        counter!("driver_finalized_l2_head_number").absolute(value);
    }

    // ================ PAYLOADS ================ //

    /// Increments the amount of unsafe payloads received from the network.
    pub(crate) fn increment_unsafe_payloads_received() {
        counter!("driver_unsafe_payloads_received").increment(1);
    }

    /// Increments the amount of failed payload publishes.
    pub(crate) fn increment_publishing_errors() {
        counter!("driver_publishing_errors").increment(1);
    }

    /// Increments the amount of missing unsafe blocks requested from the
    /// backup sync client.
    pub(crate) fn increment_gap_blocks_requested(count: u64) {
        counter!("driver_gap_blocks_requested").increment(count);
    }
}
