// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Windows spooler bridge over the Win32 printing API.

use core::ffi::c_void;

use ::windows::Win32::Foundation::GetLastError;
use ::windows::Win32::Graphics::Printing::{
    ClosePrinter, DOC_INFO_1W, EndDocPrinter, EndPagePrinter, EnumPrintersW, GetDefaultPrinterW,
    OpenPrinterW, PRINTER_ENUM_CONNECTIONS, PRINTER_ENUM_LOCAL, PRINTER_HANDLE, PRINTER_INFO_2W,
    StartDocPrinterW, StartPagePrinter, WritePrinter,
};
use ::windows::core::{PCWSTR, PWSTR};
use tracing::debug;

use crate::traits::{NativeError, SpoolHandle, SpoolerApi, SpoolerPrinter};

/// The live Win32 spooler.
#[derive(Debug, Default, Clone, Copy)]
pub struct WinSpool;

impl WinSpool {
    pub fn new() -> Self {
        Self
    }
}

fn to_wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

fn last_error() -> NativeError {
    win32_error(unsafe { GetLastError() }.0)
}

fn win32_error(code: u32) -> NativeError {
    NativeError::new(i64::from(code), format!("Windows Error: {code}"))
}

/// Errors from `Result`-returning bindings carry the code as an HRESULT and
/// the thread's last-error value may already be overwritten.
fn native_error(e: &::windows::core::Error) -> NativeError {
    win32_error(win32_code(e.code().0))
}

/// The Win32 error inside a `FACILITY_WIN32` HRESULT, or the HRESULT bits.
fn win32_code(hresult: i32) -> u32 {
    let bits = hresult as u32;
    if bits & 0xFFFF_0000 == 0x8007_0000 {
        bits & 0xFFFF
    } else {
        bits
    }
}

fn raw_handle(handle: SpoolHandle) -> PRINTER_HANDLE {
    PRINTER_HANDLE {
        Value: handle.0 as *mut c_void,
    }
}

/// # Safety
/// `p` must be null or point to a NUL-terminated UTF-16 string.
unsafe fn wide_to_string(p: PWSTR) -> String {
    if p.is_null() {
        String::new()
    } else {
        unsafe { p.to_string() }.unwrap_or_default()
    }
}

impl SpoolerApi for WinSpool {
    fn open_printer(&self, name: &str) -> Result<SpoolHandle, NativeError> {
        let name_w = to_wide(name);
        let mut handle = PRINTER_HANDLE::default();
        unsafe { OpenPrinterW(PCWSTR::from_raw(name_w.as_ptr()), &mut handle, None) }
            .map_err(|e| native_error(&e))?;
        debug!(printer = name, "OpenPrinterW ok");
        Ok(SpoolHandle(handle.Value as usize))
    }

    fn start_doc(
        &self,
        handle: SpoolHandle,
        doc_name: &str,
        datatype: &str,
    ) -> Result<u32, NativeError> {
        let doc_name_w = to_wide(doc_name);
        let datatype_w = to_wide(datatype);
        let doc_info = DOC_INFO_1W {
            pDocName: PWSTR(doc_name_w.as_ptr() as *mut _),
            pOutputFile: PWSTR::null(),
            pDatatype: PWSTR(datatype_w.as_ptr() as *mut _),
        };
        let job_id =
            unsafe { StartDocPrinterW(raw_handle(handle), 1, &doc_info as *const DOC_INFO_1W) };
        if job_id == 0 {
            return Err(last_error());
        }
        Ok(job_id)
    }

    fn start_page(&self, handle: SpoolHandle) -> Result<(), NativeError> {
        if unsafe { StartPagePrinter(raw_handle(handle)) }.as_bool() {
            Ok(())
        } else {
            Err(last_error())
        }
    }

    fn write(&self, handle: SpoolHandle, data: &[u8]) -> Result<u32, NativeError> {
        let mut written: u32 = 0;
        let ok = unsafe {
            WritePrinter(
                raw_handle(handle),
                data.as_ptr() as *const c_void,
                data.len() as u32,
                &mut written,
            )
        };
        if ok.as_bool() {
            Ok(written)
        } else {
            Err(last_error())
        }
    }

    fn end_page(&self, handle: SpoolHandle) {
        let _ = unsafe { EndPagePrinter(raw_handle(handle)) };
    }

    fn end_doc(&self, handle: SpoolHandle) {
        let _ = unsafe { EndDocPrinter(raw_handle(handle)) };
    }

    fn close_printer(&self, handle: SpoolHandle) {
        let _ = unsafe { ClosePrinter(raw_handle(handle)) };
    }

    fn enum_printers(&self) -> Result<Vec<SpoolerPrinter>, NativeError> {
        let flags = PRINTER_ENUM_LOCAL | PRINTER_ENUM_CONNECTIONS;
        let mut needed: u32 = 0;
        let mut returned: u32 = 0;

        unsafe {
            // First call only sizes the buffer.
            let _ = EnumPrintersW(flags, None, 2, None, &mut needed, &mut returned);
            if needed == 0 {
                return Ok(Vec::new());
            }

            let mut buf: Vec<u8> = vec![0; needed as usize];
            EnumPrintersW(
                flags,
                None,
                2,
                Some(buf.as_mut_slice()),
                &mut needed,
                &mut returned,
            )
            .map_err(|e| native_error(&e))?;

            let base = buf.as_ptr() as *const PRINTER_INFO_2W;
            let printers = (0..returned as usize)
                .map(|i| {
                    let info = std::ptr::read_unaligned(base.add(i));
                    SpoolerPrinter {
                        name: wide_to_string(info.pPrinterName),
                        port_name: wide_to_string(info.pPortName),
                        status: info.Status,
                        attributes: info.Attributes,
                    }
                })
                .collect();
            Ok(printers)
        }
    }

    fn default_printer(&self) -> Option<String> {
        unsafe {
            let mut needed: u32 = 0;
            let _ = GetDefaultPrinterW(None, &mut needed);
            if needed == 0 {
                return None;
            }

            let mut buf: Vec<u16> = vec![0; needed as usize];
            if !GetDefaultPrinterW(Some(PWSTR(buf.as_mut_ptr())), &mut needed).as_bool() {
                return None;
            }
            PWSTR(buf.as_mut_ptr()).to_string().ok()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::windows::core::HRESULT;

    #[test]
    fn win32_code_unwraps_facility_win32() {
        // HRESULT_FROM_WIN32(ERROR_INVALID_PRINTER_NAME)
        assert_eq!(win32_code(0x8007_0709_u32 as i32), 1801);
        assert_eq!(win32_code(0x8007_0005_u32 as i32), 5);
        // E_INVALIDARG wraps ERROR_INVALID_PARAMETER; E_FAIL wraps nothing.
        assert_eq!(win32_code(0x8007_0057_u32 as i32), 87);
        assert_eq!(win32_code(0x8000_4005_u32 as i32), 0x8000_4005);
    }

    #[test]
    fn binding_errors_keep_their_code() {
        let e = ::windows::core::Error::from_hresult(HRESULT(0x8007_0709_u32 as i32));
        let native = native_error(&e);
        assert_eq!(native.code, 1801);
        assert_eq!(native.message, "Windows Error: 1801");
    }
}
