pub mod report_commands;
