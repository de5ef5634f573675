mod composer_flow;
mod config_file;
mod http_dispatch;
