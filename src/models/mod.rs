// ============================================================================
// MODELS - MODULE PRINCIPAL
// ============================================================================
//
// Description:
//   Point d'entrée pour tous les modèles de données.
//   Chaque modèle correspond à une table SQLite avec SeaORM.
//
// Liste des modules:
//   - health : Health check API
//   - users : Utilisateurs (id + nom)
//   - movies : Films (titre, année, réalisateur, note, affiche)
//   - user_movies : Table de jointure N-N utilisateurs <-> films
//   - dto : Data Transfer Objects pour les requêtes/réponses API
//
// Points d'attention:
//   - Tous les modèles utilisent SeaORM (pas de SQL brut)
//   - Un film n'existe que s'il est référencé par au moins une association
//     (suppression gérée par le data manager, pas par une contrainte SQL)
//
// ============================================================================

pub mod health;
pub mod users;
pub mod movies;
pub mod user_movies;
pub mod dto;
