mod common;

use std::sync::Arc;
use std::time::Duration;

use catalog::app::backend::{router, ProductStore};
use catalog::app::product::{FormField, PointerEvent, ProductFormView, ProductListView};
use catalog::{
    CatalogError, ErrorCategory, HistoryNavigator, HttpProductApi, ProductApi, Route,
};
use common::{product, release_in, RecordingNotifier};
use tokio::net::TcpListener;

const BASE_PATH: &str = "/bp/products";

/// 在随机端口启动内存后端，返回指向它的客户端
async fn spawn_backend(store: ProductStore) -> HttpProductApi {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    let app = router(store, BASE_PATH);
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    HttpProductApi::new(
        &format!("http://{address}{BASE_PATH}"),
        Duration::from_secs(5),
    )
    .unwrap()
}

#[tokio::test]
async fn client_round_trip_against_backend() {
    let store = ProductStore::new();
    let api = spawn_backend(store.clone()).await;

    assert!(api.get_products().await.unwrap().data.is_empty());
    assert!(!api.verify_product_id("trj-crd").await.unwrap());

    let created = api
        .add_product(&product("trj-crd", "Tarjeta de Credito"))
        .await
        .unwrap();
    assert_eq!(created.id, "trj-crd");
    assert!(api.verify_product_id("trj-crd").await.unwrap());

    let mut changed = created.clone();
    changed.name = "Tarjeta de Credito Oro".to_string();
    let updated = api.update_product("trj-crd", &changed).await.unwrap();
    assert_eq!(updated.name, "Tarjeta de Credito Oro");
    assert_eq!(store.get("trj-crd").unwrap().name, "Tarjeta de Credito Oro");

    api.delete_product("trj-crd").await.unwrap();
    assert!(store.is_empty());
}

#[tokio::test]
async fn backend_errors_keep_their_status() {
    let api = spawn_backend(ProductStore::new()).await;
    api.add_product(&product("abc", "Producto ABC")).await.unwrap();

    let duplicate = api.add_product(&product("abc", "Producto ABC")).await.unwrap_err();
    assert_eq!(duplicate.category(), ErrorCategory::BadRequest);
    assert_eq!(duplicate.status(), Some(400));

    let missing = api.delete_product("zzz").await.unwrap_err();
    assert!(matches!(
        missing,
        CatalogError::NotFound { status: 404, ref message } if message == "Not product found with that identifier"
    ));

    let missing = api
        .update_product("zzz", &product("zzz", "Producto ZZZ"))
        .await
        .unwrap_err();
    assert_eq!(missing.category(), ErrorCategory::NotFound);
}

#[tokio::test]
async fn unreachable_backend_is_a_network_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    drop(listener);

    let api = HttpProductApi::new(
        &format!("http://{address}{BASE_PATH}"),
        Duration::from_secs(2),
    )
    .unwrap();

    let err = api.get_products().await.unwrap_err();
    assert!(matches!(err, CatalogError::Network(_)));
    assert_eq!(err.category(), ErrorCategory::Unexpected);
}

#[tokio::test]
async fn full_workflow_through_views() {
    let api: Arc<dyn ProductApi> = Arc::new(spawn_backend(ProductStore::new()).await);
    let navigator = Arc::new(HistoryNavigator::new());
    let notifier = Arc::new(RecordingNotifier::default());

    let mut list = ProductListView::new(api.clone(), navigator.clone(), 5);
    list.init().await.unwrap();
    assert_eq!(list.count_results(), 0);

    // 新增
    list.go_to_add_product();
    let mut form = ProductFormView::from_route(
        api.clone(),
        navigator.clone(),
        notifier.clone(),
        &navigator.current(),
    );
    form.set_field(FormField::Id, "trj-pla");
    form.set_field(FormField::Name, "Tarjeta Platinum");
    form.set_field(FormField::Description, "Tarjeta de credito con beneficios");
    form.set_field(FormField::Logo, "https://example.com/platinum.png");
    form.set_field(
        FormField::DateRelease,
        release_in(20).format("%Y-%m-%d").to_string(),
    );
    form.submit().await.unwrap();
    assert_eq!(navigator.current(), Route::ProductList);

    // 同一 ID 再次提交被拦截
    let mut again = ProductFormView::new(api.clone(), navigator.clone(), notifier.clone(), None);
    again.set_field(FormField::Id, "trj-pla");
    again.set_field(FormField::Name, "Tarjeta Platinum");
    again.set_field(FormField::Description, "Tarjeta de credito con beneficios");
    again.set_field(FormField::Logo, "https://example.com/platinum.png");
    again.set_field(
        FormField::DateRelease,
        release_in(20).format("%Y-%m-%d").to_string(),
    );
    assert!(matches!(
        again.submit().await,
        Err(CatalogError::Conflict { .. })
    ));

    // 编辑
    list.load_products().await.unwrap();
    assert_eq!(list.count_results(), 1);
    let target = list.displayed_products()[0].clone();
    list.select_product(PointerEvent::primary(10.0, 10.0), &target);
    list.go_to_edit_product().unwrap();

    let mut edit = ProductFormView::from_route(
        api.clone(),
        navigator.clone(),
        notifier.clone(),
        &navigator.current(),
    );
    edit.set_field(FormField::DateRelease, release_in(40).format("%Y-%m-%d").to_string());
    let updated = edit.submit().await.unwrap();
    assert_eq!(updated.date_release, release_in(40));

    // 删除
    list.load_products().await.unwrap();
    let target = list.displayed_products()[0].clone();
    assert_eq!(target.date_release, release_in(40));
    list.select_product(PointerEvent::primary(0.0, 0.0), &target);
    list.open_delete_modal().unwrap();
    list.confirm_delete_product().await.unwrap();
    assert_eq!(list.count_results(), 0);
    assert!(!api.verify_product_id("trj-pla").await.unwrap());
}
