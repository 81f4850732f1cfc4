use crate::error::{CheckerError, Result};
use std::cmp::Ordering;
use std::process::Command;
use tracing::debug;

/// Arch-style package version ordering
pub trait VersionComparator {
    /// `Less` when `current` is older than `latest`
    fn compare(&self, current: &str, latest: &str) -> Result<Ordering>;
}

/// Delegates to the `vercmp` tool shipped with pacman
#[derive(Debug, Clone)]
pub struct ExternalVercmp {
    program: String,
}

impl ExternalVercmp {
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl VersionComparator for ExternalVercmp {
    fn compare(&self, current: &str, latest: &str) -> Result<Ordering> {
        let output = Command::new(&self.program)
            .arg(current)
            .arg(latest)
            .output()
            .map_err(|e| CheckerError::VercmpFailed(format!("could not run {}: {}", self.program, e)))?;

        if !output.status.success() {
            return Err(CheckerError::VercmpFailed(format!(
                "{} exited with {}",
                self.program, output.status
            )));
        }

        parse_vercmp_output(&String::from_utf8_lossy(&output.stdout))
    }
}

/// Map the integer printed by `vercmp` to an ordering
pub fn parse_vercmp_output(output: &str) -> Result<Ordering> {
    let value: i64 = output
        .trim()
        .parse()
        .map_err(|_| CheckerError::VercmpFailed(format!("unexpected output: {:?}", output.trim())))?;

    Ok(value.cmp(&0))
}

/// In-process reimplementation of libalpm's `alpm_pkg_vercmp`
///
/// Versions have the form `[epoch:]version[-release]`. Epochs default to 0,
/// and the release is only compared when both sides have one.
#[derive(Debug, Default, Clone, Copy)]
pub struct AlpmVercmp;

impl VersionComparator for AlpmVercmp {
    fn compare(&self, current: &str, latest: &str) -> Result<Ordering> {
        Ok(alpm_vercmp(current, latest))
    }
}

/// Pick `vercmp` when it is installed, otherwise compare in-process
pub fn default_comparator() -> Box<dyn VersionComparator> {
    match which::which("vercmp") {
        Ok(path) => {
            debug!("Using {}", path.display());
            Box::new(ExternalVercmp::with_program(path.to_string_lossy()))
        }
        Err(_) => {
            debug!("vercmp not found, using built-in version comparison");
            Box::new(AlpmVercmp)
        }
    }
}

pub fn alpm_vercmp(a: &str, b: &str) -> Ordering {
    if a == b {
        return Ordering::Equal;
    }

    let (epoch1, ver1, rel1) = parse_evr(a);
    let (epoch2, ver2, rel2) = parse_evr(b);

    match rpmvercmp(epoch1.as_bytes(), epoch2.as_bytes()) {
        Ordering::Equal => {}
        ord => return ord,
    }

    match rpmvercmp(ver1.as_bytes(), ver2.as_bytes()) {
        Ordering::Equal => {}
        ord => return ord,
    }

    match (rel1, rel2) {
        (Some(r1), Some(r2)) => rpmvercmp(r1.as_bytes(), r2.as_bytes()),
        _ => Ordering::Equal,
    }
}

/// Split `[epoch:]version[-release]`
fn parse_evr(evr: &str) -> (&str, &str, Option<&str>) {
    let digits = evr.bytes().take_while(u8::is_ascii_digit).count();

    let (epoch, rest) = match evr[digits..].strip_prefix(':') {
        Some(rest) if digits == 0 => ("0", rest),
        Some(rest) => (&evr[..digits], rest),
        None => ("0", evr),
    };

    match rest.rsplit_once('-') {
        Some((version, release)) => (epoch, version, Some(release)),
        None => (epoch, rest, None),
    }
}

/// Segment-wise comparison of a single version component
fn rpmvercmp(a: &[u8], b: &[u8]) -> Ordering {
    if a == b {
        return Ordering::Equal;
    }

    let (mut one, mut two) = (0, 0);
    let (mut ptr1, mut ptr2) = (0, 0);

    while one < a.len() && two < b.len() {
        while one < a.len() && !a[one].is_ascii_alphanumeric() {
            one += 1;
        }
        while two < b.len() && !b[two].is_ascii_alphanumeric() {
            two += 1;
        }

        if one >= a.len() || two >= b.len() {
            break;
        }

        // differing separator lengths decide on their own
        if one - ptr1 != two - ptr2 {
            return (one - ptr1).cmp(&(two - ptr2));
        }

        ptr1 = one;
        ptr2 = two;

        let is_num = a[ptr1].is_ascii_digit();
        if is_num {
            ptr1 += count_while(&a[ptr1..], u8::is_ascii_digit);
            ptr2 += count_while(&b[ptr2..], u8::is_ascii_digit);
        } else {
            ptr1 += count_while(&a[ptr1..], u8::is_ascii_alphabetic);
            ptr2 += count_while(&b[ptr2..], u8::is_ascii_alphabetic);
        }

        // numeric segments are always newer than alpha segments
        if two == ptr2 {
            return if is_num { Ordering::Greater } else { Ordering::Less };
        }

        let mut seg1 = &a[one..ptr1];
        let mut seg2 = &b[two..ptr2];

        if is_num {
            seg1 = &seg1[count_while(seg1, |c| *c == b'0')..];
            seg2 = &seg2[count_while(seg2, |c| *c == b'0')..];

            match seg1.len().cmp(&seg2.len()) {
                Ordering::Equal => {}
                ord => return ord,
            }
        }

        match seg1.cmp(seg2) {
            Ordering::Equal => {}
            ord => return ord,
        }

        one = ptr1;
        two = ptr2;
    }

    let rest1 = &a[one..];
    let rest2 = &b[two..];

    if rest1.is_empty() && rest2.is_empty() {
        return Ordering::Equal;
    }

    // a trailing alpha part never beats an empty one
    let two_is_alpha = rest2.first().is_some_and(u8::is_ascii_alphabetic);
    let one_is_alpha = rest1.first().is_some_and(u8::is_ascii_alphabetic);
    if (rest1.is_empty() && !two_is_alpha) || one_is_alpha {
        Ordering::Less
    } else {
        Ordering::Greater
    }
}

fn count_while(bytes: &[u8], pred: impl Fn(&u8) -> bool) -> usize {
    bytes.iter().take_while(|&c| pred(c)).count()
}
