use std::collections::HashSet;
use serde::{Serialize, Deserialize};
use thiserror::Error;
use crate::models::Module;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Catalog has no participants")]
    NoParticipants,
    #[error("Catalog has no modules")]
    NoModules,
    #[error("Duplicate participant: {0}")]
    DuplicateParticipant(String),
    #[error("Duplicate module id: {0}")]
    DuplicateModule(String),
    #[error("Malformed catalog: {0}")]
    Malformed(String),
}

/// The fixed roster and module list. Read-only once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    participants: Vec<String>,
    modules: Vec<Module>,
}

impl Catalog {
    pub fn new(participants: Vec<String>, modules: Vec<Module>) -> Result<Self, CatalogError> {
        if participants.is_empty() {
            return Err(CatalogError::NoParticipants);
        }
        if modules.is_empty() {
            return Err(CatalogError::NoModules);
        }

        let mut seen = HashSet::new();
        if let Some(dup) = participants.iter().find(|p| !seen.insert(p.as_str())) {
            return Err(CatalogError::DuplicateParticipant(dup.clone()));
        }

        let mut seen = HashSet::new();
        if let Some(dup) = modules.iter().find(|m| !seen.insert(m.id.as_str())) {
            return Err(CatalogError::DuplicateModule(dup.id.clone()));
        }

        Ok(Self { participants, modules })
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let raw: Catalog = serde_json::from_str(json)
            .map_err(|e| CatalogError::Malformed(e.to_string()))?;
        Self::new(raw.participants, raw.modules)
    }

    pub fn participants(&self) -> &[String] { &self.participants }

    pub fn modules(&self) -> &[Module] { &self.modules }

    pub fn is_participant(&self, name: &str) -> bool {
        self.participants.iter().any(|p| p == name)
    }

    pub fn module(&self, id: &str) -> Option<&Module> {
        self.modules.iter().find(|m| m.id == id)
    }
}

const DEFAULT_PARTICIPANTS: [&str; 7] = [
    "Julien.R",
    "Cathy.D",
    "Az-Eddine.E",
    "Gaëlline.L",
    "Olivier.M",
    "Stéphanie.P",
    "Pierre-Louis.W",
];

const DEFAULT_MODULES: [(&str, &str, &str, &str); 17] = [
    ("m1_1", "Introduction au Cloud Azure",
     "Concepts fondamentaux du cloud computing, les modèles de service (IaaS, PaaS, SaaS) et les avantages d'Azure.",
     "4 heures"),
    ("m1_2", "Panorama des services PaaS Azure",
     "Présentation des principaux services PaaS d'Azure : App Service, Azure SQL Database, Azure Storage, Azure Functions, etc.",
     "5 heures"),
    ("m1_3", "Mise en place d'un environnement de démonstration",
     "Création et configuration d'un environnement Azure pour les démonstrations pratiques.",
     "4 heures"),
    ("m1_4", "Gestion des environnements multiples",
     "Stratégies et outils pour gérer efficacement plusieurs environnements (développement, test, production) sur Azure.",
     "4 heures"),
    ("m2_1", "Gestion des identités et des accès (RBAC)",
     "Mise en œuvre du contrôle d'accès basé sur les rôles (RBAC) pour sécuriser les ressources Azure.",
     "5 heures"),
    ("m2_2", "Sécurisation des secrets avec Azure Key Vault",
     "Utilisation d'Azure Key Vault pour stocker et gérer de manière sécurisée les clés, secrets et certificats.",
     "4 heures"),
    ("m2_3", "Gouvernance et conformité avec Azure Policy",
     "Application des politiques Azure pour assurer la conformité et la gouvernance des ressources.",
     "4 heures"),
    ("m2_4", "Audit et surveillance des accès",
     "Mise en place de l'audit et de la surveillance pour suivre les activités et les accès aux ressources Azure.",
     "4 heures"),
    ("m2_5", "Intégration avec Azure AD Connect",
     "Synchronisation des identités entre l'Active Directory on-premise et Azure Active Directory.",
     "4 heures"),
    ("m3_1", "Monitoring et alertes avec Azure Monitor",
     "Utilisation d'Azure Monitor pour collecter, analyser et agir sur les données de télémétrie de vos environnements Azure.",
     "5 heures"),
    ("m3_2", "Analyse des logs avec KQL",
     "Apprentissage du langage de requête Kusto (KQL) pour interroger les logs dans Azure Log Analytics.",
     "5 heures"),
    ("m3_3", "Création de tableaux de bord personnalisés",
     "Conception et implémentation de tableaux de bord Azure pour visualiser les métriques et les logs clés.",
     "4 heures"),
    ("m3_4", "Optimisation des coûts Azure",
     "Stratégies et outils pour analyser et optimiser les dépenses liées à l'utilisation des services Azure.",
     "4 heures"),
    ("m4_1", "Déploiement Continu avec Azure DevOps",
     "Intégration d'Azure DevOps dans les projets Azure PaaS pour automatiser les déploiements et améliorer la qualité du code.",
     "7 heures"),
    ("m4_2", "Infrastructure as Code (IaC) avec ARM Templates et Bicep",
     "Principes de l'Infrastructure as Code et l'utilisation d'ARM Templates et Bicep pour déployer des infrastructures Azure reproductibles.",
     "8 heures"),
    ("m4_3", "Fonctions Serverless et Logic Apps",
     "Développement serverless sur Azure avec Azure Functions et l'automatisation des workflows avec Logic Apps.",
     "8 heures"),
    ("m5_1", "Azure Virtual Networks (VNets)",
     "Configuration et gestion des réseaux virtuels Azure pour sécuriser et optimiser les services PaaS.",
     "8 heures"),
];

impl Default for Catalog {
    fn default() -> Self {
        Self {
            participants: DEFAULT_PARTICIPANTS.iter().map(|p| p.to_string()).collect(),
            modules: DEFAULT_MODULES
                .iter()
                .map(|&(id, title, description, duration)| Module {
                    id: id.into(),
                    title: title.into(),
                    description: description.into(),
                    duration: duration.into(),
                })
                .collect(),
        }
    }
}
