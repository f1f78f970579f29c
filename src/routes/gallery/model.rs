use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalleryItem {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub image: String,
    pub category: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct GalleryQuery {
    pub category: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GalleryListResponse {
    pub count: usize,
    pub total: usize,
    pub data: Vec<GalleryItem>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub message: String,
}

/// Métadonnées d'un nouvel élément, le fichier étant déjà écrit sur disque.
#[derive(Debug)]
pub struct NewGalleryItem {
    pub title: String,
    pub description: String,
    pub category: String,
    pub image: String,
}

/// Liste en mémoire, possédée par l'état applicatif et injectée dans les
/// handlers. Vit le temps du processus ; brancher un vrai stockage plus tard
/// revient à remplacer ce type.
#[derive(Clone)]
pub struct GalleryStore {
    items: Arc<RwLock<Vec<GalleryItem>>>,
}

impl GalleryStore {
    pub fn new(items: Vec<GalleryItem>) -> Self {
        Self {
            items: Arc::new(RwLock::new(items)),
        }
    }

    /// Contenu initial repris du site : trois réalisations de référence.
    pub fn seeded() -> Self {
        let now = Utc::now();
        Self::new(vec![
            GalleryItem {
                id: 1,
                title: "Installation chauffage moderne".into(),
                description:
                    "Installation complète d'un système de chauffage moderne avec radiateurs design"
                        .into(),
                image: "/uploads/gallery/img5.jpg".into(),
                category: "chauffage".into(),
                created_at: now - Duration::days(2),
            },
            GalleryItem {
                id: 2,
                title: "Rénovation salle de bain".into(),
                description:
                    "Rénovation complète d'une salle de bain avec installation sanitaire moderne"
                        .into(),
                image: "/uploads/gallery/img6.jpg".into(),
                category: "plomberie".into(),
                created_at: now - Duration::days(1),
            },
            GalleryItem {
                id: 3,
                title: "Installation climatisation".into(),
                description:
                    "Installation d'un système de climatisation efficace pour une maison individuelle"
                        .into(),
                image: "/uploads/gallery/img7.jpg".into(),
                category: "climatisation".into(),
                created_at: now,
            },
        ])
    }

    /// Filtre par catégorie (`all` ou absente = tout), tri du plus récent au
    /// plus ancien, puis coupe à `limit`. Renvoie aussi le total non filtré.
    pub async fn list(
        &self,
        category: Option<&str>,
        limit: Option<usize>,
    ) -> (Vec<GalleryItem>, usize) {
        let items = self.items.read().await;
        let total = items.len();

        let mut filtered: Vec<GalleryItem> = items
            .iter()
            .filter(|item| match category {
                Some(c) if !c.eq_ignore_ascii_case("all") => {
                    item.category.eq_ignore_ascii_case(c)
                }
                _ => true,
            })
            .cloned()
            .collect();

        filtered.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        if let Some(limit) = limit {
            filtered.truncate(limit);
        }

        (filtered, total)
    }

    pub async fn get(&self, id: i64) -> Option<GalleryItem> {
        self.items.read().await.iter().find(|i| i.id == id).cloned()
    }

    pub async fn insert(&self, new: NewGalleryItem) -> GalleryItem {
        let mut items = self.items.write().await;
        let id = items.iter().map(|i| i.id).max().unwrap_or(0) + 1;
        let item = GalleryItem {
            id,
            title: new.title,
            description: new.description,
            category: new.category.to_lowercase(),
            image: new.image,
            created_at: Utc::now(),
        };
        items.push(item.clone());
        item
    }

    pub async fn remove(&self, id: i64) -> Option<GalleryItem> {
        let mut items = self.items.write().await;
        let index = items.iter().position(|i| i.id == id)?;
        Some(items.remove(index))
    }

    pub async fn categories(&self) -> Vec<String> {
        let items = self.items.read().await;
        let mut categories = Vec::new();
        for item in items.iter() {
            if !categories.contains(&item.category) {
                categories.push(item.category.clone());
            }
        }
        categories
    }
}
