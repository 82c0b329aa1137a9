//! 命令会话与协作者

use cartogram_core::config::DesignConfig;
use cartogram_core::registry::GeoRegistry;
use cartogram_core::services::{MarkerService, MessageSink, PromptService, SurfaceSampler};

/// 调用方持有的会话状态
#[derive(Debug, Default)]
pub struct Session {
    pub registry: GeoRegistry,
    pub config: DesignConfig,
}

impl Session {
    pub fn new(config: DesignConfig) -> Self {
        Self {
            registry: GeoRegistry::new(),
            config,
        }
    }
}

/// 命令使用的外部协作者
pub struct Services<'a> {
    pub markers: &'a mut dyn MarkerService,
    pub prompt: &'a mut dyn PromptService,
    pub surfaces: &'a dyn SurfaceSampler,
    pub messages: &'a mut dyn MessageSink,
}

impl<'a> Services<'a> {
    pub fn new(
        markers: &'a mut dyn MarkerService,
        prompt: &'a mut dyn PromptService,
        surfaces: &'a dyn SurfaceSampler,
        messages: &'a mut dyn MessageSink,
    ) -> Self {
        Self {
            markers,
            prompt,
            surfaces,
            messages,
        }
    }

    /// 向用户输出消息
    pub fn report(&mut self, text: impl AsRef<str>) {
        self.messages.report(text.as_ref());
    }
}
