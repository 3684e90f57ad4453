use mongodb::bson::{doc, oid::ObjectId, Document};
use serde::{Deserialize, Serialize};

pub const ABOUT_COLLECTION: &str = "Nosotros";
pub const SETTINGS_COLLECTION: &str = "Configuracion";

/// Typed skeleton of the about-page document. The live read/update path
/// works on raw [`Document`]s so unknown keys and empty nested objects
/// round-trip untouched; this struct only backs the initial seeding.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AboutPage {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default)]
    pub titulo: String,
    #[serde(default)]
    pub descripcion: String,
    #[serde(default)]
    pub antecedentes: Background,
    #[serde(rename = "quienesSomos", default)]
    pub quienes_somos: IllustratedSection,
    #[serde(default)]
    pub mision: Section,
    #[serde(default)]
    pub vision: Section,
    #[serde(default)]
    pub valores: Vec<Section>,
    #[serde(flatten)]
    pub extra: Document,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Section {
    #[serde(default)]
    pub titulo: String,
    #[serde(default)]
    pub descripcion: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct IllustratedSection {
    #[serde(default)]
    pub titulo: String,
    #[serde(default)]
    pub descripcion: String,
    #[serde(default)]
    pub imagen: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Background {
    #[serde(default)]
    pub titulo: String,
    #[serde(default)]
    pub descripcion1: String,
    #[serde(default)]
    pub descripcion2: String,
    #[serde(default)]
    pub imagen: String,
}

impl AboutPage {
    /// Default content inserted by the seeder when the collection is empty.
    pub fn seed() -> Self {
        Self {
            id: None,
            titulo: "Nosotros".into(),
            descripcion: "Conoce la historia de Patitas.".into(),
            antecedentes: Background {
                titulo: "Antecedentes".into(),
                descripcion1: "Patitas nació como una tienda familiar de productos para mascotas.".into(),
                descripcion2: "Hoy atendemos a clientes en línea en todo el país.".into(),
                imagen: String::new(),
            },
            quienes_somos: IllustratedSection {
                titulo: "¿Quiénes somos?".into(),
                descripcion: "Un equipo de amantes de los animales.".into(),
                imagen: String::new(),
            },
            mision: Section {
                titulo: "Misión".into(),
                descripcion: "Ofrecer productos de calidad para el bienestar de las mascotas.".into(),
            },
            vision: Section {
                titulo: "Visión".into(),
                descripcion: "Ser la tienda de mascotas de referencia en la región.".into(),
            },
            valores: vec![
                Section { titulo: "Honestidad".into(), descripcion: "Precios y productos claros.".into() },
                Section { titulo: "Respeto".into(), descripcion: "Por los clientes y sus mascotas.".into() },
            ],
            extra: Document::new(),
        }
    }
}

/// Default site-settings document for the `Configuracion` singleton.
pub fn settings_seed() -> Document {
    doc! {
        "nombreTienda": "Patitas",
        "correoContacto": "contacto@patitas.mx",
        "telefono": "",
        "direccion": "",
        "horario": "Lunes a sábado, 9:00 - 19:00",
        "redesSociales": {
            "facebook": "",
            "instagram": "",
            "tiktok": "",
        },
    }
}
