use std::path::PathBuf;

use crate::error::{LabelError, Result};

/// Where finished print jobs go.
pub trait PrintSink: Send + Sync {
    fn send(&self, title: &str, data: &[u8]) -> Result<()>;
}

/// Raw job to a named printer through the Windows spooler.
#[derive(Debug, Clone)]
pub struct SpoolerSink {
    pub printer_name: String,
}

impl SpoolerSink {
    pub fn new(printer_name: impl Into<String>) -> Self {
        SpoolerSink { printer_name: printer_name.into() }
    }
}

impl PrintSink for SpoolerSink {
    fn send(&self, title: &str, data: &[u8]) -> Result<()> {
        send_raw_to_printer(&self.printer_name, title, data)
    }
}

/// Writes each job to `<dir>/<title>.epl`.
#[derive(Debug, Clone)]
pub struct FileSink {
    pub dir: PathBuf,
}

impl FileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileSink { dir: dir.into() }
    }

    pub fn path_for(&self, title: &str) -> PathBuf {
        let stem: String = title
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        let stem = if stem.is_empty() { "label".to_string() } else { stem };
        self.dir.join(format!("{stem}.epl"))
    }
}

impl PrintSink for FileSink {
    fn send(&self, title: &str, data: &[u8]) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.path_for(title), data)?;
        Ok(())
    }
}

/// Send raw bytes to the named printer. On non-Windows this function returns an error.
pub fn send_raw_to_printer(printer_name: &str, doc_name: &str, data: &[u8]) -> Result<()> {
    #[cfg(target_os = "windows")]
    {
        use std::ffi::OsStr;
        use std::iter::once;
        use std::os::windows::ffi::OsStrExt;
        use std::ptr::null_mut;
        use winapi::shared::minwindef::DWORD;
        use winapi::shared::ntdef::LPWSTR;
        use winapi::um::winspool::*;

        let fail = |step| LabelError::Printer { printer: printer_name.to_string(), step };

        // Keep these vectors alive for the duration of the calls.
        let wide_name: Vec<u16> = OsStr::new(printer_name).encode_wide().chain(once(0)).collect();
        let wide_doc: Vec<u16> = OsStr::new(doc_name).encode_wide().chain(once(0)).collect();
        let wide_raw: Vec<u16> = OsStr::new("RAW").encode_wide().chain(once(0)).collect();

        unsafe {
            let mut handle: *mut winapi::ctypes::c_void = null_mut();
            if OpenPrinterW(wide_name.as_ptr() as LPWSTR, &mut handle as *mut _ as *mut _, null_mut()) == 0 {
                return Err(fail("OpenPrinterW"));
            }

            let doc_info = DOC_INFO_1W {
                pDocName: wide_doc.as_ptr() as LPWSTR,
                pOutputFile: null_mut(),
                pDatatype: wide_raw.as_ptr() as LPWSTR, // RAW data type
            };

            let job = StartDocPrinterW(handle as *mut _, 1, &doc_info as *const _ as *mut _);
            if job == 0 {
                ClosePrinter(handle as *mut _);
                return Err(fail("StartDocPrinterW"));
            }

            if StartPagePrinter(handle as *mut _) == 0 {
                EndDocPrinter(handle as *mut _);
                ClosePrinter(handle as *mut _);
                return Err(fail("StartPagePrinter"));
            }

            let mut written: DWORD = 0;
            let ok = WritePrinter(
                handle as *mut _,
                data.as_ptr() as *mut _,
                data.len() as DWORD,
                &mut written as *mut DWORD,
            );

            EndPagePrinter(handle as *mut _);
            EndDocPrinter(handle as *mut _);
            ClosePrinter(handle as *mut _);

            if ok == 0 || written as usize != data.len() {
                return Err(fail("WritePrinter"));
            }
            Ok(())
        }
    }

    #[cfg(not(target_os = "windows"))]
    {
        let _ = (printer_name, doc_name, data);
        Err(LabelError::UnsupportedPlatform("raw spooler printing"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_sink_names_jobs_by_title() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FileSink::new(dir.path());
        sink.send("Café 1/2 kg", b"N\r\nP1\r\n").unwrap();
        let path = dir.path().join("Café_1_2_kg.epl");
        assert_eq!(std::fs::read(path).unwrap(), b"N\r\nP1\r\n");
    }

    #[test]
    fn file_sink_blank_title() {
        let sink = FileSink::new("/tmp/labels");
        assert_eq!(sink.path_for(""), PathBuf::from("/tmp/labels/label.epl"));
    }

    #[cfg(not(target_os = "windows"))]
    #[test]
    fn spooler_is_windows_only() {
        let err = SpoolerSink::new("Zebra LP2824").send("Price label", b"N").unwrap_err();
        assert!(matches!(err, LabelError::UnsupportedPlatform(_)));
    }
}
