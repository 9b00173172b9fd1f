//! LibreOffice in headless mode
//!
//! Runs `<office> -env:UserInstallation=<profile> --headless --convert-to pdf
//! --outdir <dir> <input>`. LibreOffice always names its output after the
//! input's file stem, so the result is `<dir>/<stem>.pdf`.
//!
//! Each run gets a throwaway user profile; instances sharing the default
//! profile can exit 0 without converting anything.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStderr, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tempfile::Builder;
use tracing::{debug, warn};
use crate::error::{Error, Result};
use super::RenderBackend;

/// Executable names tried, in order, when no binary is configured
const PROGRAM_NAMES: [&str; 2] = ["libreoffice", "soffice"];

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Headless office-suite rendering backend
#[derive(Debug, Clone)]
pub struct HeadlessOffice {
    program: Option<PathBuf>,
    timeout: Duration,
}

impl HeadlessOffice {
    /// Find an office binary on PATH
    pub fn detect(timeout: Duration) -> Self {
        let program = PROGRAM_NAMES
            .iter()
            .find_map(|name| which::which(name).ok());

        match &program {
            Some(p) => debug!("using office engine at {}", p.display()),
            None => debug!("no office engine found on PATH"),
        }

        Self { program, timeout }
    }

    /// Use an explicit binary, resolved through PATH if it is a bare name
    pub fn with_program(program: &Path, timeout: Duration) -> Self {
        let program = which::which(program).ok();
        Self { program, timeout }
    }

    pub fn program(&self) -> Option<&Path> {
        self.program.as_deref()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Wait for `child`, killing it once the timeout has passed
    fn wait_with_timeout(&self, child: &mut Child) -> Result<ExitStatus> {
        let start = Instant::now();
        loop {
            if let Some(status) = child.try_wait()? {
                return Ok(status);
            }
            if start.elapsed() > self.timeout {
                warn!("{} timed out after {:?}, killing it", self.name(), self.timeout);
                let _ = child.kill();
                let _ = child.wait();
                return Err(Error::EngineTimeout {
                    engine: self.name().to_string(),
                    timeout: self.timeout,
                });
            }
            thread::sleep(POLL_INTERVAL);
        }
    }
}

/// Read the engine's stderr on a separate thread so it never fills the pipe
fn drain(pipe: Option<ChildStderr>) -> Option<JoinHandle<String>> {
    pipe.map(|mut pipe| {
        thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = pipe.read_to_end(&mut buf);
            String::from_utf8_lossy(&buf).into_owned()
        })
    })
}

/// `file://` URL for a local directory, as LibreOffice expects for profiles
fn file_url(path: &Path) -> String {
    let path = path.to_string_lossy().replace('\\', "/");
    if path.starts_with('/') {
        format!("file://{}", path)
    } else {
        format!("file:///{}", path)
    }
}

impl RenderBackend for HeadlessOffice {
    fn name(&self) -> &str {
        self.program
            .as_deref()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
            .unwrap_or("libreoffice")
    }

    fn is_available(&self) -> bool {
        self.program.is_some()
    }

    fn render_to_pdf(&self, input: &Path, out_dir: &Path) -> Result<PathBuf> {
        let program = self.program.as_deref().ok_or_else(|| {
            Error::EngineUnavailable("LibreOffice not found in PATH".to_string())
        })?;

        if !input.exists() {
            return Err(Error::FileNotFound(input.to_path_buf()));
        }
        let input = input.canonicalize()?;
        let stem = input
            .file_stem()
            .ok_or_else(|| Error::General(format!("Invalid input file name: {}", input.display())))?;

        let profile = Builder::new().prefix("doc-pages-profile-").tempdir()?;
        let profile_arg = format!("-env:UserInstallation={}", file_url(profile.path()));

        debug!(
            "running {} {} --headless --convert-to pdf --outdir {} {}",
            program.display(),
            profile_arg,
            out_dir.display(),
            input.display()
        );

        let mut child = Command::new(program)
            .arg(&profile_arg)
            .arg("--headless")
            .arg("--convert-to")
            .arg("pdf")
            .arg("--outdir")
            .arg(out_dir)
            .arg(&input)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()?;

        let stderr = drain(child.stderr.take());
        // On timeout the reader is left detached; a surviving grandchild may
        // still hold the pipe open.
        let status = self.wait_with_timeout(&mut child)?;
        let stderr = stderr
            .and_then(|handle| handle.join().ok())
            .unwrap_or_default();

        if !status.success() {
            return Err(Error::EngineFailed {
                engine: self.name().to_string(),
                code: status.code(),
                stderr: stderr.trim().to_string(),
            });
        }

        let mut file_name = stem.to_os_string();
        file_name.push(".pdf");
        let generated = out_dir.join(file_name);

        if !generated.exists() {
            return Err(Error::MissingOutput(generated));
        }

        Ok(generated)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::TempDir;
    use crate::count::pdf::tests::write_blank_pdf;
    use crate::count::count_pages;

    /// Picks `$out`, `$src` and `$profile` out of the office command line
    const PARSE_ARGS: &str = r#"while [ $# -gt 0 ]; do
  case "$1" in
    --outdir) out="$2"; shift ;;
    -env:*) profile="$1" ;;
    -*) ;;
    *) src="$1" ;;
  esac
  shift
done"#;

    /// Install a stand-in office binary that runs `body` under /bin/sh
    fn fake_office(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("fake-soffice");
        fs::write(&path, format!("#!/bin/sh\n{}\n{}\n", PARSE_ARGS, body)).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[test]
    fn test_unavailable_without_program() {
        let office = HeadlessOffice::with_program(Path::new("/nonexistent/soffice"), Duration::from_secs(1));
        assert!(!office.is_available());
        let err = office.render_to_pdf(Path::new("a.docx"), Path::new(".")).unwrap_err();
        assert!(matches!(err, Error::EngineUnavailable(_)));
    }

    #[test]
    fn test_renders_to_stem_named_pdf() {
        let dir = TempDir::new().unwrap();
        let fixture = dir.path().join("fixture.pdf");
        write_blank_pdf(&fixture, 3);

        let script = format!(
            "base=$(basename \"$src\")\ncp \"{}\" \"$out/${{base%.*}}.pdf\"",
            fixture.display()
        );
        let office = HeadlessOffice::with_program(&fake_office(dir.path(), &script), Duration::from_secs(10));
        assert!(office.is_available());
        assert_eq!(office.name(), "fake-soffice");

        let input = dir.path().join("letter.docx");
        fs::write(&input, b"docx bytes").unwrap();
        let out_dir = TempDir::new().unwrap();

        let pdf = office.render_to_pdf(&input, out_dir.path()).unwrap();
        assert_eq!(pdf, out_dir.path().join("letter.pdf"));
        assert_eq!(count_pages(&pdf).unwrap(), 3);
    }

    #[test]
    fn test_chatty_engine_does_not_stall() {
        let dir = TempDir::new().unwrap();
        let fixture = dir.path().join("fixture.pdf");
        write_blank_pdf(&fixture, 2);

        // Far more than a pipe buffer holds
        let script = format!(
            "head -c 200000 /dev/zero | tr '\\0' x >&2\nbase=$(basename \"$src\")\ncp \"{}\" \"$out/${{base%.*}}.pdf\"\nexit 0",
            fixture.display()
        );
        let office = HeadlessOffice::with_program(&fake_office(dir.path(), &script), Duration::from_secs(10));
        let input = dir.path().join("verbose.docx");
        fs::write(&input, b"x").unwrap();
        let out_dir = TempDir::new().unwrap();

        let pdf = office.render_to_pdf(&input, out_dir.path()).unwrap();
        assert_eq!(pdf, out_dir.path().join("verbose.pdf"));
        assert_eq!(count_pages(&pdf).unwrap(), 2);
    }

    #[test]
    fn test_each_run_gets_its_own_profile() {
        let dir = TempDir::new().unwrap();
        let seen = dir.path().join("profiles.txt");

        // Exit 9 unless a private profile was passed
        let script = format!(
            "case \"$profile\" in\n  -env:UserInstallation=file:///*) ;;\n  *) exit 9 ;;\nesac\necho \"$profile\" >> \"{}\"\nbase=$(basename \"$src\")\n: > \"$out/${{base%.*}}.pdf\"",
            seen.display()
        );
        let office = HeadlessOffice::with_program(&fake_office(dir.path(), &script), Duration::from_secs(10));
        let input = dir.path().join("memo.docx");
        fs::write(&input, b"x").unwrap();

        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        office.render_to_pdf(&input, first.path()).unwrap();
        office.render_to_pdf(&input, second.path()).unwrap();

        let profiles = fs::read_to_string(&seen).unwrap();
        let profiles: Vec<&str> = profiles.lines().collect();
        assert_eq!(profiles.len(), 2);
        assert_ne!(profiles[0], profiles[1]);

        // Profiles are removed once the run is over
        for profile in profiles {
            let dir = profile.trim_start_matches("-env:UserInstallation=file://");
            assert!(!Path::new(dir).exists(), "{} was left behind", dir);
        }
    }

    #[test]
    fn test_file_url() {
        assert_eq!(file_url(Path::new("/tmp/profile")), "file:///tmp/profile");
        assert_eq!(file_url(Path::new("C:\\Temp\\profile")), "file:///C:/Temp/profile");
    }

    #[test]
    fn test_nonzero_exit_is_engine_failure() {
        let dir = TempDir::new().unwrap();
        let office = HeadlessOffice::with_program(
            &fake_office(dir.path(), "echo 'source file could not be loaded' >&2\nexit 3"),
            Duration::from_secs(10),
        );
        let input = dir.path().join("broken.docx");
        fs::write(&input, b"x").unwrap();

        match office.render_to_pdf(&input, dir.path()).unwrap_err() {
            Error::EngineFailed { code, stderr, .. } => {
                assert_eq!(code, Some(3));
                assert!(stderr.contains("could not be loaded"));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_success_without_output_is_missing_output() {
        let dir = TempDir::new().unwrap();
        let office = HeadlessOffice::with_program(&fake_office(dir.path(), "exit 0"), Duration::from_secs(10));
        let input = dir.path().join("quiet.docx");
        fs::write(&input, b"x").unwrap();

        let err = office.render_to_pdf(&input, dir.path()).unwrap_err();
        assert!(matches!(err, Error::MissingOutput(_)));
    }

    #[test]
    fn test_timeout_kills_engine() {
        let dir = TempDir::new().unwrap();
        let office = HeadlessOffice::with_program(&fake_office(dir.path(), "exec sleep 30"), Duration::from_millis(300));
        let input = dir.path().join("slow.docx");
        fs::write(&input, b"x").unwrap();

        let start = Instant::now();
        let err = office.render_to_pdf(&input, dir.path()).unwrap_err();
        assert!(matches!(err, Error::EngineTimeout { .. }));
        assert!(start.elapsed() < Duration::from_secs(10));
    }
}
