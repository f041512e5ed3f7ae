use dotring::ipc::ControlCommand;

#[derive(Debug, Clone)]
pub enum AppEvent {
    Start,
    Stop,
    Restart,
    ConfigReload,
}

impl From<ControlCommand> for AppEvent {
    fn from(command: ControlCommand) -> Self {
        match command {
            ControlCommand::Start => AppEvent::Start,
            ControlCommand::Stop => AppEvent::Stop,
            ControlCommand::Restart => AppEvent::Restart,
        }
    }
}
