use std::env;
use std::process::Command;

// CPU features this crate ships kernels for. Highest priority first.
#[derive(Debug)]
struct CpuFeature {
    name: &'static str,
    rustc_flag: &'static str,
    cfg_flag: &'static str,
    detected: bool,
}

impl CpuFeature {
    fn features() -> Vec<CpuFeature> {
        vec![
            CpuFeature {
                name: "avx2",
                rustc_flag: "+avx2,+avx,+fma",
                cfg_flag: "avx2",
                detected: false,
            },
            CpuFeature {
                name: "neon",
                rustc_flag: "+neon",
                cfg_flag: "neon",
                detected: false,
            },
        ]
    }
}

// Per-OS detection, so builds stay correct without asking users to set
// RUSTFLAGS themselves.
trait CpuFeatureDetector {
    fn detect_features(&self, features: &mut [CpuFeature]);
    fn is_applicable(&self) -> bool;
}

struct LinuxDetector;
impl CpuFeatureDetector for LinuxDetector {
    fn detect_features(&self, features: &mut [CpuFeature]) {
        if let Ok(cpuinfo) = std::fs::read_to_string("/proc/cpuinfo") {
            let contents = cpuinfo.to_lowercase();
            for feature in features.iter_mut() {
                feature.detected = contents.contains(feature.name);
            }
        }
        // aarch64 Linux reports NEON as "asimd" in /proc/cpuinfo.
        if cfg!(target_arch = "aarch64") {
            if let Ok(cpuinfo) = std::fs::read_to_string("/proc/cpuinfo") {
                if cpuinfo.to_lowercase().contains("asimd") {
                    for feature in features.iter_mut() {
                        if feature.name == "neon" {
                            feature.detected = true;
                        }
                    }
                }
            }
        }
    }

    fn is_applicable(&self) -> bool {
        cfg!(target_os = "linux")
    }
}

struct MacOSDetector;
impl CpuFeatureDetector for MacOSDetector {
    fn detect_features(&self, features: &mut [CpuFeature]) {
        let output = Command::new("sysctl").args(["-a"]).output();

        if let Ok(output) = output {
            let contents = String::from_utf8_lossy(&output.stdout).to_lowercase();

            for feature in features.iter_mut() {
                match feature.name {
                    "avx2" => feature.detected = contents.contains("hw.optional.avx2_0: 1"),
                    "neon" => feature.detected = contents.contains("hw.optional.neon: 1"),
                    _ => {}
                }
            }
        }
    }

    fn is_applicable(&self) -> bool {
        cfg!(target_os = "macos")
    }
}

struct PlatformDetector;
impl PlatformDetector {
    fn cpu_features_detectors() -> Vec<Box<dyn CpuFeatureDetector>> {
        vec![Box::new(LinuxDetector), Box::new(MacOSDetector)]
    }

    fn detect_cpu_features(features: &mut [CpuFeature]) {
        for detector in Self::cpu_features_detectors() {
            if detector.is_applicable() {
                detector.detect_features(features);
                break;
            }
        }
    }

    fn apply(features: &[CpuFeature]) {
        // First detected feature wins; the vector is ordered by priority.
        // No detected feature means the scalar fallback kernels.
        let cfg_flag = features
            .iter()
            .find(|cpu_feature| cpu_feature.detected)
            .map(|cpu_feature| {
                println!("cargo:rustc-flag=-C");
                println!("cargo:rustc-flag=target-feature={}", cpu_feature.rustc_flag);
                cpu_feature.cfg_flag
            })
            .unwrap_or("fallback");

        println!("cargo:rustc-cfg={cfg_flag}");

        println!("cargo::rustc-check-cfg=cfg(avx2)");
        println!("cargo::rustc-check-cfg=cfg(neon)");
        println!("cargo::rustc-check-cfg=cfg(fallback)");
    }
}

fn main() {
    let mut features = CpuFeature::features();

    // Cross-compiled targets get the fallback kernels; probing the host CPU
    // would enable instructions the target may not have.
    let host = env::var("HOST").unwrap_or_default();
    let target = env::var("TARGET").unwrap_or_default();

    if host == target {
        PlatformDetector::detect_cpu_features(&mut features);
    }

    PlatformDetector::apply(&features);
}
