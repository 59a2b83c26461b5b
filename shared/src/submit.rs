/// 异步操作的通用状态机
///
/// `Idle -> Submitting -> Succeeded | Failed`，结束后可再次提交。
/// 提交中再次提交会被拒绝。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmitState {
    #[default]
    Idle,
    Submitting,
    Succeeded(Option<String>),
    Failed(String),
}

impl SubmitState {
    /// 开始提交，已在提交中时返回 false
    pub fn begin(&mut self) -> bool {
        if self.is_submitting() {
            return false;
        }
        *self = SubmitState::Submitting;
        true
    }

    pub fn succeed(&mut self, message: Option<String>) {
        *self = SubmitState::Succeeded(message);
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        *self = SubmitState::Failed(message.into());
    }

    pub fn reset(&mut self) {
        *self = SubmitState::Idle;
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, SubmitState::Submitting)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            SubmitState::Failed(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn success(&self) -> Option<&str> {
        match self {
            SubmitState::Succeeded(Some(msg)) => Some(msg),
            _ => None,
        }
    }
}
