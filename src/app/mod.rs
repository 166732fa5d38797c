mod app_helper;
pub(crate) use app_helper::AppHelper;

mod command;
pub(crate) use command::Command;

mod encode_command;
pub(crate) use encode_command::EncodeCommand;
