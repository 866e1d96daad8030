//! ESP-IDF implementations of the device capabilities.

use esp_idf_svc::hal::delay::FreeRtos;
use esp_idf_svc::sys;
use log::{info, warn};

use super::{Clock, Hardware};

/// `esp_timer` based clock.
#[derive(Default)]
pub struct EspClock;

impl Clock for EspClock {
    fn now_ms(&self) -> u64 {
        // SAFETY: esp_timer_get_time is always safe to call after boot
        let us = unsafe { sys::esp_timer_get_time() };
        (us / 1000) as u64
    }

    fn delay_ms(&self, ms: u64) {
        FreeRtos::delay_ms(ms.min(u32::MAX as u64) as u32);
    }
}

/// Heap, CPU and restart control through ESP-IDF.
#[derive(Default)]
pub struct EspHardware {
    ip: Option<String>,
}

impl EspHardware {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the station IP once Wi-Fi is up, for the banner.
    pub fn set_local_ip(&mut self, ip: impl Into<String>) {
        self.ip = Some(ip.into());
    }
}

impl Hardware for EspHardware {
    fn free_heap(&self) -> u32 {
        // SAFETY: read-only query of the heap allocator
        unsafe { sys::esp_get_free_heap_size() }
    }

    fn set_cpu_frequency(&mut self, mhz: u32) {
        let config = sys::esp_pm_config_t {
            max_freq_mhz: mhz as i32,
            min_freq_mhz: mhz as i32,
            light_sleep_enable: false,
        };
        // SAFETY: config outlives the call; esp_pm copies it
        let err = unsafe { sys::esp_pm_configure(&config as *const _ as *const core::ffi::c_void) };
        if err == sys::ESP_OK {
            info!("esp: cpu frequency set to {} MHz", mhz);
        } else {
            warn!("esp: esp_pm_configure({} MHz) failed: {}", mhz, err);
        }
    }

    fn restart(&mut self) {
        // SAFETY: esp_restart never returns
        unsafe { sys::esp_restart() }
    }

    fn local_ip(&self) -> Option<String> {
        self.ip.clone()
    }

    fn mac_address(&self) -> Option<String> {
        let mut mac = [0u8; 6];
        // SAFETY: buffer holds the six bytes esp_read_mac writes
        let err = unsafe { sys::esp_read_mac(mac.as_mut_ptr(), sys::esp_mac_type_t_ESP_MAC_WIFI_STA) };
        if err != sys::ESP_OK {
            return None;
        }
        Some(format!(
            "{:02X}:{:02X}:{:02X}:{:02X}:{:02X}:{:02X}",
            mac[0], mac[1], mac[2], mac[3], mac[4], mac[5]
        ))
    }
}
