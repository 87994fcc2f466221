//! 产品功能：模型、日期规则、服务接口、列表视图与表单视图

pub mod dates;
pub mod form;
pub mod list;
pub mod model;
pub mod service;

pub use form::{FormField, FormMode, ProductForm, ProductFormView};
pub use list::{filter_products, ContextMenu, LoadState, PointerButton, PointerEvent, ProductListView};
pub use model::{Product, ProductEnvelope};
pub use service::ProductApi;
