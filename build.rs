//! Build-time capability probe
//!
//! Compiles small C snippets against the target's headers to find out whether
//! `statx` and the `FS_IOC_GETFLAGS`/`FS_IOC_SETFLAGS` ioctls are exposed. Each
//! successful probe turns on a cfg consumed by the crate:
//!
//! - `statx_available`: `__NR_statx` is defined in `<sys/syscall.h>`
//! - `fs_ioc_flags_available`: both ioctl request codes are defined in `<linux/fs.h>`
//!
//! A probe that fails for any reason (missing header, missing C compiler,
//! non-Linux target) leaves its cfg off and the crate uses the degraded path.

use std::env;
use std::fs;
use std::path::PathBuf;

const STATX_PROBE: &str = r#"
#include <sys/syscall.h>
#ifndef __NR_statx
#error "statx is not exposed by this target"
#endif
int statx_compat_statx_probe(void) { return __NR_statx; }
"#;

const FS_IOC_FLAGS_PROBE: &str = r#"
#include <sys/ioctl.h>
#include <linux/fs.h>
#if !defined(FS_IOC_GETFLAGS) || !defined(FS_IOC_SETFLAGS)
#error "FS_IOC_GETFLAGS/FS_IOC_SETFLAGS are not exposed by this target"
#endif
unsigned long statx_compat_flags_probe(void) { return FS_IOC_GETFLAGS ^ FS_IOC_SETFLAGS; }
"#;

/// Compile `source` as a throwaway object; `true` if the compiler accepted it
fn probe(name: &str, source: &str) -> bool {
    let Some(out_dir) = env::var_os("OUT_DIR").map(PathBuf::from) else {
        return false;
    };
    let file = out_dir.join(format!("{name}.c"));
    if fs::write(&file, source).is_err() {
        return false;
    }

    cc::Build::new()
        .file(&file)
        .cargo_metadata(false)
        .cargo_warnings(false)
        .warnings(false)
        .try_compile(name)
        .is_ok()
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    if env::var("CARGO_CFG_TARGET_OS").as_deref() != Ok("linux") {
        return;
    }

    if probe("statx_probe", STATX_PROBE) {
        println!("cargo:rustc-cfg=statx_available");
    } else {
        println!("cargo:warning=statx not found in target headers, using fstat/lstat");
    }

    if probe("fs_ioc_flags_probe", FS_IOC_FLAGS_PROBE) {
        println!("cargo:rustc-cfg=fs_ioc_flags_available");
    } else {
        println!("cargo:warning=FS_IOC_GETFLAGS not found in target headers, file flags unsupported");
    }
}
