//! 悬停提示
//!
//! 指针进入宿主元素时在其正上方挂载一个标签，离开时移除。
//! 每个宿主同一时间最多只有一个标签。

use std::collections::BTreeMap;

pub const TOOLTIP_CLASS: &str = "tooltip";
pub const DEFAULT_OFFSET_PX: f64 = 30.0;

/// 宿主元素在视口中的位置
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingRect {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollOffset {
    pub x: f64,
    pub y: f64,
}

/// 已定位的标签，坐标为页面坐标
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipLabel {
    pub text: String,
    pub class: &'static str,
    pub top: f64,
    pub left: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LabelHandle(u64);

/// 标签挂载的目标（文档 body）
pub trait TooltipSurface {
    fn attach(&mut self, label: TooltipLabel) -> LabelHandle;

    fn detach(&mut self, handle: LabelHandle) -> Option<TooltipLabel>;
}

#[derive(Debug, Clone)]
pub struct Tooltip {
    text: String,
    offset: f64,
    shown: Option<LabelHandle>,
}

impl Tooltip {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            offset: DEFAULT_OFFSET_PX,
            shown: None,
        }
    }

    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    pub fn label_for(&self, host: BoundingRect, scroll: ScrollOffset) -> TooltipLabel {
        TooltipLabel {
            text: self.text.clone(),
            class: TOOLTIP_CLASS,
            top: host.top + scroll.y - self.offset,
            left: host.left + scroll.x,
        }
    }

    /// 已显示时不重复创建；返回是否新挂载了标签
    pub fn on_pointer_enter(
        &mut self,
        host: BoundingRect,
        scroll: ScrollOffset,
        surface: &mut dyn TooltipSurface,
    ) -> bool {
        if self.shown.is_some() {
            return false;
        }

        let handle = surface.attach(self.label_for(host, scroll));
        self.shown = Some(handle);
        true
    }

    pub fn on_pointer_leave(&mut self, surface: &mut dyn TooltipSurface) -> bool {
        match self.shown.take() {
            Some(handle) => surface.detach(handle).is_some(),
            None => false,
        }
    }

    pub fn is_shown(&self) -> bool {
        self.shown.is_some()
    }
}

/// 内存中的文档层，按挂载顺序保存标签
#[derive(Debug, Default)]
pub struct Overlay {
    labels: BTreeMap<LabelHandle, TooltipLabel>,
    next: u64,
}

impl Overlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn labels(&self) -> impl Iterator<Item = &TooltipLabel> {
        self.labels.values()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl TooltipSurface for Overlay {
    fn attach(&mut self, label: TooltipLabel) -> LabelHandle {
        let handle = LabelHandle(self.next);
        self.next += 1;
        self.labels.insert(handle, label);
        handle
    }

    fn detach(&mut self, handle: LabelHandle) -> Option<TooltipLabel> {
        self.labels.remove(&handle)
    }
}
