//! 产品列表视图
//!
//! 加载全部产品后在本地按名称过滤并截断到每页数量；
//! 单击选中的产品驱动编辑导航和删除确认框。

use std::sync::Arc;

use tracing::{error, info, warn};

use super::model::Product;
use super::service::ProductApi;
use crate::app::navigation::{Navigator, Route};
use crate::core::error::{CatalogError, ErrorCategory, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Loaded,
    LoadFailed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Auxiliary,
    Secondary,
}

impl PointerButton {
    /// 由浏览器事件的 `which` 值转换（1 左键，2 中键，3 右键）
    pub fn from_which(which: u16) -> Option<Self> {
        match which {
            1 => Some(Self::Primary),
            2 => Some(Self::Auxiliary),
            3 => Some(Self::Secondary),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub button: PointerButton,
    pub client_x: f64,
    pub client_y: f64,
}

impl PointerEvent {
    pub fn primary(client_x: f64, client_y: f64) -> Self {
        Self {
            button: PointerButton::Primary,
            client_x,
            client_y,
        }
    }
}

/// 产品操作菜单，显示在点击位置
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ContextMenu {
    pub visible: bool,
    pub left: f64,
    pub top: f64,
}

/// 名称不区分大小写的子串过滤，再截断到 `page_size` 条
pub fn filter_products(products: &[Product], search_text: &str, page_size: usize) -> Vec<Product> {
    if search_text.is_empty() {
        return products.iter().take(page_size).cloned().collect();
    }

    let needle = search_text.to_lowercase();
    products
        .iter()
        .filter(|product| product.name.to_lowercase().contains(&needle))
        .take(page_size)
        .cloned()
        .collect()
}

pub struct ProductListView {
    api: Arc<dyn ProductApi>,
    navigator: Arc<dyn Navigator>,
    state: LoadState,
    products: Vec<Product>,
    displayed_products: Vec<Product>,
    count_results: usize,
    search_text: String,
    items_per_page: usize,
    current_product: Option<Product>,
    context_menu: ContextMenu,
    delete_modal_open: bool,
}

impl ProductListView {
    pub fn new(api: Arc<dyn ProductApi>, navigator: Arc<dyn Navigator>, items_per_page: usize) -> Self {
        Self {
            api,
            navigator,
            state: LoadState::Idle,
            products: Vec::new(),
            displayed_products: Vec::new(),
            count_results: 0,
            search_text: String::new(),
            items_per_page,
            current_product: None,
            context_menu: ContextMenu::default(),
            delete_modal_open: false,
        }
    }

    /// 首次进入页面：加载列表并收起菜单
    pub async fn init(&mut self) -> Result<()> {
        self.close_context_menu();
        self.load_products().await
    }

    pub async fn load_products(&mut self) -> Result<()> {
        self.state = LoadState::Loading;

        match self.api.get_products().await {
            Ok(envelope) => {
                info!(count = envelope.data.len(), "产品列表加载完成");
                self.products = envelope.data;
                self.count_results = self.products.len();
                self.state = LoadState::Loaded;
                self.on_items_per_page_change();
                Ok(())
            }
            Err(err) => {
                error!(error = %err, "加载产品列表失败");
                self.products.clear();
                self.displayed_products.clear();
                self.count_results = 0;
                self.state = LoadState::LoadFailed;
                Err(err)
            }
        }
    }

    /// 重新计算显示的产品。
    ///
    /// 有搜索词时 `count_results` 为过滤后显示的数量，否则为全部产品数量。
    pub fn filtered_products(&mut self) {
        self.displayed_products =
            filter_products(&self.products, &self.search_text, self.items_per_page);
        self.count_results = if self.search_text.is_empty() {
            self.products.len()
        } else {
            self.displayed_products.len()
        };
    }

    pub fn on_items_per_page_change(&mut self) {
        self.filtered_products();
    }

    pub fn set_items_per_page(&mut self, items_per_page: usize) {
        self.items_per_page = items_per_page;
        self.on_items_per_page_change();
    }

    pub fn set_search_text(&mut self, search_text: impl Into<String>) {
        self.search_text = search_text.into();
        self.filtered_products();
    }

    pub fn go_to_add_product(&self) {
        self.navigator.navigate(Route::ProductAdd);
    }

    /// 左键点击产品：记录当前产品并在点击位置打开菜单
    pub fn select_product(&mut self, event: PointerEvent, product: &Product) {
        if event.button != PointerButton::Primary {
            return;
        }

        self.context_menu = ContextMenu {
            visible: true,
            left: event.client_x,
            top: event.client_y,
        };
        self.current_product = Some(product.clone());
    }

    pub fn close_context_menu(&mut self) {
        self.context_menu.visible = false;
    }

    pub fn go_to_edit_product(&mut self) -> Result<()> {
        let product = self.current_product.clone().ok_or_else(|| {
            warn!("没有选中的产品，无法编辑");
            CatalogError::NoSelection
        })?;

        self.close_context_menu();
        self.navigator.navigate(Route::ProductEdit(product));
        Ok(())
    }

    pub fn open_delete_modal(&mut self) -> Result<()> {
        if self.current_product.is_none() {
            warn!("没有选中的产品，无法删除");
            return Err(CatalogError::NoSelection);
        }

        self.close_context_menu();
        self.delete_modal_open = true;
        Ok(())
    }

    pub fn cancel_delete(&mut self) {
        self.delete_modal_open = false;
    }

    /// 确认删除当前产品，成功后重新加载整个列表。
    ///
    /// 必须先通过 [`open_delete_modal`](Self::open_delete_modal) 打开确认框；
    /// 失败时只记录日志，不修改本地状态。
    pub async fn confirm_delete_product(&mut self) -> Result<()> {
        let confirmed = std::mem::take(&mut self.delete_modal_open);

        let Some(product) = self.current_product.as_ref() else {
            error!("删除失败：未选择产品");
            return Err(CatalogError::NoSelection);
        };
        if !confirmed {
            warn!(id = %product.id, "删除失败：确认框未打开");
            return Err(CatalogError::NotConfirmed);
        }
        let id = product.id.clone();

        if let Err(err) = self.api.delete_product(&id).await {
            match err.category() {
                ErrorCategory::NotFound => {
                    error!(id = %id, status = ?err.status(), "删除失败：产品不存在")
                }
                _ => error!(id = %id, error = %err, "删除产品时发生意外错误"),
            }
            return Err(err);
        }

        info!(id = %id, "产品已删除");
        self.current_product = None;
        self.load_products().await
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn displayed_products(&self) -> &[Product] {
        &self.displayed_products
    }

    pub fn count_results(&self) -> usize {
        self.count_results
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    pub fn current_product(&self) -> Option<&Product> {
        self.current_product.as_ref()
    }

    pub fn context_menu(&self) -> ContextMenu {
        self.context_menu
    }

    pub fn is_delete_modal_open(&self) -> bool {
        self.delete_modal_open
    }
}
