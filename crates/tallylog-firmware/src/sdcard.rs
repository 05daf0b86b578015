//! SD card storage over SPI, mounted through the ESP-IDF VFS.
//!
//! Once mounted, the log lives on a FAT volume reachable with plain
//! `std::fs`; the store does one open/append/sync/close cycle per event.

use core::ptr;
use std::fs::{File, OpenOptions};
use std::io::Write;

use esp_idf_svc::hal::gpio::Pin;
use esp_idf_svc::hal::spi::SpiDriver;
use esp_idf_svc::sys;

use tallylog_core::{EventStore, StoreError};

pub const SD_MOUNT_POINT: &str = "/sd";
const SD_MAX_FILES: i32 = 4;

pub struct SdCardStore {
    // Mount handle stays registered with the VFS for the process
    // lifetime; the struct only marks that mounting succeeded.
    _mounted: (),
}

impl SdCardStore {
    /// Initialize the card on the given SPI bus and mount its first
    /// FAT volume at [`SD_MOUNT_POINT`].
    pub fn mount(spi: &SpiDriver, cs_pin: impl Pin) -> Result<Self, StoreError> {
        let c_base = std::ffi::CString::new(SD_MOUNT_POINT)
            .map_err(|_| StoreError::IoError("Invalid mount path".into()))?;

        let host = build_sdspi_host(spi.host());
        let slot_config = sys::sdspi_device_config_t {
            host_id: spi.host(),
            gpio_cs: cs_pin.pin(),
            gpio_cd: -1,
            gpio_wp: -1,
            gpio_int: -1,
            gpio_wp_polarity: false,
        };

        let mount_config = sys::esp_vfs_fat_mount_config_t {
            format_if_mount_failed: false,
            max_files: SD_MAX_FILES,
            allocation_unit_size: 0,
            disk_status_check_enable: false,
            use_one_fat: false,
        };

        let res = unsafe {
            sys::esp_vfs_fat_sdspi_mount(
                c_base.as_ptr(),
                &host,
                &slot_config,
                &mount_config,
                ptr::null_mut(),
            )
        };

        if res != sys::ESP_OK {
            return Err(StoreError::IoError(format!("SD mount failed: {}", res)));
        }

        log::info!("SD card mounted at {}", SD_MOUNT_POINT);
        Ok(Self { _mounted: () })
    }
}

impl EventStore for SdCardStore {
    type Handle = File;

    fn open_append(&mut self, path: &str) -> Result<File, StoreError> {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(to_store_error)
    }

    fn write_line(&mut self, handle: &mut File, line: &str) -> Result<(), StoreError> {
        handle
            .write_all(line.as_bytes())
            .and_then(|()| handle.write_all(b"\n"))
            .map_err(to_store_error)
    }

    fn close(&mut self, handle: File) -> Result<(), StoreError> {
        // Push the line through the FATFS cache onto the card before the
        // handle drops; after this the event survives power loss.
        handle.sync_all().map_err(to_store_error)
    }
}

fn to_store_error(err: std::io::Error) -> StoreError {
    match err.kind() {
        std::io::ErrorKind::NotFound => StoreError::NotFound,
        _ => StoreError::IoError(format!("{:?}", err)),
    }
}

fn build_sdspi_host(host_id: sys::spi_host_device_t) -> sys::sdmmc_host_t {
    const SDMMC_HOST_FLAG_SPI: u32 = 1 << 3;
    const SDMMC_HOST_FLAG_DEINIT_ARG: u32 = 1 << 5;

    sys::sdmmc_host_t {
        flags: SDMMC_HOST_FLAG_SPI | SDMMC_HOST_FLAG_DEINIT_ARG,
        slot: host_id as _,
        max_freq_khz: 20_000,
        io_voltage: 3.3,
        init: Some(sys::sdspi_host_init),
        set_bus_width: None,
        get_bus_width: None,
        set_bus_ddr_mode: None,
        set_card_clk: Some(sys::sdspi_host_set_card_clk),
        set_cclk_always_on: None,
        do_transaction: Some(sys::sdspi_host_do_transaction),
        __bindgen_anon_1: sys::sdmmc_host_t__bindgen_ty_1 {
            deinit_p: Some(sys::sdspi_host_remove_device),
        },
        io_int_enable: Some(sys::sdspi_host_io_int_enable),
        io_int_wait: Some(sys::sdspi_host_io_int_wait),
        command_timeout_ms: 0,
        get_real_freq: Some(sys::sdspi_host_get_real_freq),
        input_delay_phase: sys::sdmmc_delay_phase_t_SDMMC_DELAY_PHASE_0,
        set_input_delay: None,
        dma_aligned_buffer: ptr::null_mut(),
        pwr_ctrl_handle: ptr::null_mut(),
        get_dma_info: Some(sys::sdspi_host_get_dma_info),
    }
}
