//! 路由与用户提示

use std::sync::{Mutex, PoisonError};

use tracing::debug;

use super::product::Product;

/// 应用路由。编辑页复用新增页的路径，产品通过导航状态传入。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    ProductList,
    ProductAdd,
    ProductEdit(Product),
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::ProductList => "/products",
            Route::ProductAdd | Route::ProductEdit(_) => "/products/add",
        }
    }

    /// 解析路径；空路径重定向到列表页
    pub fn parse(path: &str) -> Option<Route> {
        match path.trim_end_matches('/') {
            "" | "/products" => Some(Route::ProductList),
            "/products/add" => Some(Route::ProductAdd),
            _ => None,
        }
    }

    pub fn editing(&self) -> Option<&Product> {
        match self {
            Route::ProductEdit(product) => Some(product),
            _ => None,
        }
    }
}

pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);

    fn back(&self);
}

/// 用户可见的提示（对应浏览器中的 alert）
pub trait Notifier: Send + Sync {
    fn alert(&self, message: &str);
}

/// 基于内存历史栈的导航器
#[derive(Debug)]
pub struct HistoryNavigator {
    history: Mutex<Vec<Route>>,
}

impl HistoryNavigator {
    pub fn new() -> Self {
        Self {
            history: Mutex::new(vec![Route::ProductList]),
        }
    }

    pub fn current(&self) -> Route {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
            .unwrap_or(Route::ProductList)
    }

    pub fn depth(&self) -> usize {
        self.history.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

impl Default for HistoryNavigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator for HistoryNavigator {
    /// 回到列表时折叠历史，列表始终是栈底
    fn navigate(&self, route: Route) {
        debug!(path = route.path(), "navigate");
        let mut history = self.history.lock().unwrap_or_else(PoisonError::into_inner);
        if route == Route::ProductList {
            history.truncate(1);
        } else {
            history.push(route);
        }
    }

    fn back(&self) {
        let mut history = self.history.lock().unwrap_or_else(PoisonError::into_inner);
        if history.len() > 1 {
            history.pop();
        }
        debug!(depth = history.len(), "navigate back");
    }
}
