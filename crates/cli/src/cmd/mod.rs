mod artifacts;
mod build;
mod configure;
mod info;
mod install;

pub use artifacts::cmd_artifacts;
pub use build::cmd_build;
pub use configure::cmd_configure;
pub use info::cmd_info;
pub use install::cmd_install;
