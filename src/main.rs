//! 产品目录命令行
//!
//! 列表、新增、编辑、删除都经过与界面相同的视图模型。

use std::path::PathBuf;
use std::sync::Arc;

use catalog::app::product::{FormField, PointerEvent, ProductFormView, ProductListView};
use catalog::infrastructure::config::{self, Config};
use catalog::infrastructure::logger::Logger;
use catalog::{CatalogError, HistoryNavigator, HttpProductApi, Navigator, Notifier, ProductApi};
use clap::{Parser, Subcommand};
use dialoguer::Confirm;

#[derive(Parser)]
#[command(name = "catalog", about = "Manage the product catalog through its REST API", version)]
struct Cli {
    /// Path to a catalog.toml configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Product resource URL (overrides the configuration)
    #[arg(long, global = true, env = "CATALOG_API_BASE_URL")]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products, optionally filtered by name
    List {
        /// Case-insensitive name filter
        #[arg(long, default_value = "")]
        search: String,

        /// Number of products to show
        #[arg(long)]
        page_size: Option<usize>,
    },

    /// Create a product after checking that its id is free
    Add {
        #[arg(long)]
        id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        logo: String,
        /// Release date (YYYY-MM-DD); the revision date is derived from it
        #[arg(long)]
        date_release: String,
    },

    /// Edit an existing product; the id cannot change
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        logo: Option<String>,
        #[arg(long)]
        date_release: Option<String>,
    },

    /// Delete a product after confirmation
    Delete {
        id: String,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Check whether an id is already taken
    Verify { id: String },
}

/// 终端提示
struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn alert(&self, message: &str) {
        println!("{message}");
    }
}

struct Context {
    config: Config,
    api: Arc<dyn ProductApi>,
    navigator: Arc<HistoryNavigator>,
    notifier: Arc<dyn Notifier>,
}

impl Context {
    fn list_view(&self) -> ProductListView {
        ProductListView::new(
            self.api.clone(),
            self.navigator.clone(),
            self.config.list.items_per_page,
        )
    }

    fn form_view(&self) -> ProductFormView {
        ProductFormView::from_route(
            self.api.clone(),
            self.navigator.clone(),
            self.notifier.clone(),
            &self.navigator.current(),
        )
    }

    /// 加载全部产品并选中指定 ID
    async fn select(&self, id: &str) -> Result<ProductListView, CatalogError> {
        let mut list = self.list_view();
        list.init().await?;

        let product = list
            .products()
            .iter()
            .find(|product| product.id == id)
            .cloned()
            .ok_or_else(|| CatalogError::not_found(format!("产品 {id} 不存在")))?;
        list.select_product(PointerEvent::primary(0.0, 0.0), &product);
        Ok(list)
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let mut config = match config::load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };
    if let Some(base_url) = cli.base_url {
        config.api.base_url = base_url;
    }
    Logger::init(&config.logging.level);

    if let Err(err) = run(config, cli.command).await {
        eprintln!("错误: {err}");
        std::process::exit(1);
    }
}

async fn run(config: Config, command: Commands) -> Result<(), CatalogError> {
    let api: Arc<dyn ProductApi> = Arc::new(HttpProductApi::from_config(&config.api)?);
    let ctx = Context {
        config,
        api,
        navigator: Arc::new(HistoryNavigator::new()),
        notifier: Arc::new(TerminalNotifier),
    };

    match command {
        Commands::List { search, page_size } => {
            let mut list = ctx.list_view();
            list.init().await?;
            if let Some(page_size) = page_size {
                list.set_items_per_page(page_size);
            }
            list.set_search_text(search);

            let images = ctx.config.display.image_fallback();
            for product in list.displayed_products() {
                println!(
                    "{:<10} {:<30} {:<12} {:<12} {}",
                    product.id,
                    product.name,
                    product.date_release,
                    product.date_revision,
                    images.transform(Some(&product.logo)),
                );
                println!("{:<10} {}", "", product.description);
            }
            println!("{} 个结果", list.count_results());
        }

        Commands::Add {
            id,
            name,
            description,
            logo,
            date_release,
        } => {
            ctx.navigator.navigate(catalog::Route::ProductAdd);
            let mut form = ctx.form_view();
            form.set_field(FormField::Id, id);
            form.set_field(FormField::Name, name);
            form.set_field(FormField::Description, description);
            form.set_field(FormField::Logo, logo);
            form.set_field(FormField::DateRelease, date_release);
            form.submit().await?;
        }

        Commands::Edit {
            id,
            name,
            description,
            logo,
            date_release,
        } => {
            let mut list = ctx.select(&id).await?;
            list.go_to_edit_product()?;

            let mut form = ctx.form_view();
            let changes = [
                (FormField::Name, name),
                (FormField::Description, description),
                (FormField::Logo, logo),
                (FormField::DateRelease, date_release),
            ];
            for (field, value) in changes {
                if let Some(value) = value {
                    form.set_field(field, value);
                }
            }
            form.submit().await?;
        }

        Commands::Delete { id, yes } => {
            let mut list = ctx.select(&id).await?;
            list.open_delete_modal()?;

            let confirmed = yes
                || Confirm::new()
                    .with_prompt(format!("确定要删除产品 {id} 吗？"))
                    .default(false)
                    .interact()
                    .unwrap_or(false);

            if confirmed {
                list.confirm_delete_product().await?;
                println!("产品 {id} 已删除，剩余 {} 个产品", list.products().len());
            } else {
                list.cancel_delete();
                println!("已取消");
            }
        }

        Commands::Verify { id } => {
            let exists = ctx.api.verify_product_id(&id).await?;
            println!("{}", if exists { "已存在" } else { "可用" });
        }
    }

    Ok(())
}
