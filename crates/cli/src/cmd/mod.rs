mod deploy;
mod hello;
mod install;

pub use deploy::cmd_deploy;
pub use hello::cmd_hello;
pub use install::cmd_install;
