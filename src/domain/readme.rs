/// 单个卡片的 README 加载状态
///
/// `Idle -> Loading -> Loaded | Failed`，每个状态实例最多触发一次请求。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ReadmeState {
    #[default]
    Idle,
    Loading,
    /// `None` 表示仓库没有 README
    Loaded(Option<String>),
    Failed,
}

impl ReadmeState {
    /// 进入 Loading，返回是否需要发起请求
    pub fn begin(&mut self) -> bool {
        match self {
            ReadmeState::Idle => {
                *self = ReadmeState::Loading;
                true
            }
            _ => false,
        }
    }

    /// 根据请求结果迁移状态，非 Loading 状态下的结果直接丢弃
    pub fn finish<E>(&mut self, outcome: Result<Option<String>, E>) {
        if *self != ReadmeState::Loading {
            return;
        }
        *self = match outcome {
            Ok(text) => ReadmeState::Loaded(text),
            Err(_) => ReadmeState::Failed,
        };
    }

    /// 已加载的文本
    pub fn text(&self) -> Option<&str> {
        match self {
            ReadmeState::Loaded(Some(text)) => Some(text),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ReadmeState::Idle => "idle",
            ReadmeState::Loading => "loading",
            ReadmeState::Loaded(_) => "loaded",
            ReadmeState::Failed => "failed",
        }
    }
}
