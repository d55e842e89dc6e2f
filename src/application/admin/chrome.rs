use std::sync::Arc;

use url::Url;

use crate::application::store::SettingsStore;
use crate::presentation::admin::views::{
    AdminBrandView, AdminChrome, AdminMetaView, AdminNavigationItemView, AdminNavigationView,
};

const NAV_ITEMS: &[(&str, &str)] = &[
    ("/", "Dashboard"),
    ("/brand", "Brand"),
    ("/contact", "Contact"),
    ("/theme", "Theme"),
    ("/services", "Services"),
    ("/hours", "Working hours"),
    ("/audit", "Audit log"),
];

#[derive(Clone)]
pub struct AdminChromeService {
    store: Arc<SettingsStore>,
    public_site_url: String,
}

impl AdminChromeService {
    pub fn new(store: Arc<SettingsStore>, public_base_url: &Url) -> Self {
        Self {
            store,
            public_site_url: normalize_public_site_url(public_base_url.as_str()),
        }
    }

    pub fn public_site_url(&self) -> &str {
        &self.public_site_url
    }

    /// Chrome for the admin layout. Reads are in-memory, so this never fails.
    pub fn load(&self, active_path: &str) -> AdminChrome {
        let settings = self.store.current();

        let brand = AdminBrandView {
            title: format!("{} Admin", settings.brand.name),
        };

        let mut items: Vec<AdminNavigationItemView> = NAV_ITEMS
            .iter()
            .map(|(href, label)| AdminNavigationItemView {
                label: (*label).to_string(),
                href: (*href).to_string(),
                is_active: *href == active_path,
                open_in_new_tab: false,
            })
            .collect();

        items.push(AdminNavigationItemView {
            label: "View site".to_string(),
            href: self.public_site_url.clone(),
            is_active: false,
            open_in_new_tab: true,
        });

        let navigation = AdminNavigationView { items };

        let active_label = navigation
            .items
            .iter()
            .find(|item| item.is_active)
            .map(|item| item.label.as_str())
            .unwrap_or("Dashboard");

        let meta = AdminMetaView {
            title: format!("{} · {}", brand.title, active_label),
            description: "Site configuration panel".to_string(),
        };

        AdminChrome {
            brand,
            navigation,
            meta,
        }
    }
}

fn normalize_public_site_url(url: &str) -> String {
    if url.ends_with('/') {
        url.to_string()
    } else {
        format!("{url}/")
    }
}
