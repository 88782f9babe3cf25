use std::env::consts;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Platform {
    pub os: &'static str,
    pub arch: &'static str,
    pub exe_suffix: &'static str,
}

impl Platform {
    pub const fn current() -> Self {
        Self {
            os: consts::OS,
            arch: consts::ARCH,
            exe_suffix: consts::EXE_SUFFIX,
        }
    }

    pub fn executable_name(&self, stem: &str) -> String {
        format!("{stem}{}", self.exe_suffix)
    }
}
