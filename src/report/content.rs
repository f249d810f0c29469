//! Literal content of the report.
//!
//! Bracketed markers such as `[IP-servidor]` are placeholders filled in by
//! personalization.

pub(super) const TITLE: &str = "DOCUMENTO DE TRANSFERENCIA TECNOLÓGICA";

/// Cover table rows; `None` takes the build date.
pub(super) const COVER: [(&str, Option<&str>); 5] = [
    ("Sistema:", Some("[NOMBRE DEL SISTEMA WEB]")),
    ("Versión:", Some("[vX.X.X]")),
    ("Fecha de transferencia:", None),
    ("Responsable actual:", Some("[Tu Nombre Completo]")),
    ("Área receptora:", Some("Operaciones e Infraestructura")),
];

pub(super) const INDEX: [&str; 14] = [
    "1. RESUMEN EJECUTIVO",
    "2. ARQUITECTURA DEL SISTEMA",
    "2.1 Diagrama de componentes",
    "2.2 Listado de microservicios",
    "3. INFRAESTRUCTURA DE PRODUCCIÓN",
    "4. PROCESO DE DESPLIEGUE ACTUAL",
    "5. CONFIGURACIÓN Y VARIABLES DE ENTORNO",
    "6. MONITOREO Y LOGS",
    "7. BACKUP Y RECUPERACIÓN",
    "8. SEGURIDAD",
    "9. PROCEDIMIENTOS DE INCIDENTES",
    "10. MEJORAS PLANEADAS / DEUDA TÉCNICA",
    "11. ANEXOS",
    "FIRMAS DE CONFORMIDAD",
];

pub(super) const SUMMARY: [(&str, &str); 7] = [
    (
        "Arquitectura:",
        "Sistema web basado en microservicios (25 servicios)",
    ),
    ("Tecnología principal:", ".NET 8 (ASP.NET Core)"),
    ("Orquestación:", "Podman en producción"),
    ("Estrategia despliegue:", "CI/CD manual desde repositorio Git"),
    ("Entorno producción:", "[Especificar servidores/cloud]"),
    ("Disponibilidad:", "[Ej: 99.5% en horario comercial]"),
    ("SLA actual:", "[Especificar acuerdos de nivel de servicio]"),
];

pub(super) const DIAGRAM: &str = "\
[API Gateway] → [Microservicios (25)] → [Bases de datos/Storage]
       ↑
[Cliente Web]  [Otros consumidores]";

pub(super) const SERVICE_HEADERS: [&str; 5] = [
    "#",
    "Nombre del Servicio",
    "Puerto",
    "Función principal",
    "Dependencias",
];

pub(super) const SERVICES: [[&str; 5]; 5] = [
    [
        "1",
        "servicio-autenticacion",
        "5001",
        "Gestión de usuarios y tokens",
        "BD_Usuarios, Redis",
    ],
    [
        "2",
        "servicio-catalogo",
        "5002",
        "Catálogo de productos",
        "BD_Catalogo",
    ],
    [
        "3",
        "servicio-pedidos",
        "5003",
        "Procesamiento de pedidos",
        "BD_Pedidos, Redis",
    ],
    [
        "4",
        "servicio-pagos",
        "5004",
        "Procesamiento de pagos",
        "API externa, BD_Pagos",
    ],
    [
        "5",
        "servicio-notificaciones",
        "5005",
        "Envío de notificaciones",
        "SMTP, BD_Notificaciones",
    ],
];

pub(super) const SERVER_SPEC: &str = "\
Servidor Principal:
  - Hostname: [nombre-servidor]
  - IP: [XXX.XXX.XXX.XXX]
  - SO: [Ej: RHEL 8.6 / Ubuntu 22.04]
  - CPU: [Especificaciones - ej: 8 cores]
  - RAM: [XX GB - ej: 32GB]
  - Storage: [XX GB - ej: 500GB] (Ruta principal: [/opt/aplicacion])
  - Podman version: [X.X.X - ej: 4.6.1]

Servidores Adicionales:
  - [Listar otros servidores si existen]";

pub(super) const DEPLOY_FLOW: &str = "\
1. Desarrollo local → 2. Commit/Push a Git → 3. SSH al servidor → 
4. Git pull → 5. Build/Publicación → 6. Recrear contenedores → 
7. Health checks → 8. Validación";

/// Comment lines start with `#`; empty strings are spacer paragraphs.
pub(super) const COMMANDS: [&str; 24] = [
    "# 1. Conectar al servidor",
    "ssh usuario@[IP-servidor] -p [puerto]",
    "",
    "# 2. Navegar al directorio",
    "cd /ruta/a/tu/proyecto",
    "",
    "# 3. Obtener últimos cambios",
    "git pull origin main",
    "",
    "# 4. Publicar servicio (ejemplo)",
    "dotnet publish servicio.csproj -c Release -o ./publish",
    "",
    "# 5. Recrear contenedor",
    "podman stop nombre-contenedor",
    "podman rm nombre-contenedor",
    "podman build -t imagen-tag .",
    "podman run -d -p 5001:5001 --name contenedor imagen-tag",
    "",
    "# 6. Verificar estado",
    "podman ps",
    "podman logs contenedor --tail 50",
    "",
    "# 7. Health check",
    "curl -f http://localhost:5001/health || echo 'FAILED'",
];

pub(super) const VARIABLE_HEADERS: [&str; 3] = ["Variable", "Ubicación", "Método de actualización"];

pub(super) const VARIABLES: [[&str; 3]; 4] = [
    [
        "ConnectionStrings__Default",
        "HashiCorp Vault / Archivo encriptado",
        "Script de rotación mensual",
    ],
    ["JWT__SecretKey", "Azure Key Vault", "Portal Azure + redeploy"],
    [
        "ExternalAPI__Key",
        "Variable de entorno en contenedor",
        "Update en podman run",
    ],
    [
        "Logging__Level",
        "appsettings.Production.json",
        "Modificar y redeploy",
    ],
];

pub(super) const METRICS: &str = "\
Críticas:
  - CPU uso > 80% por 5 min
  - Memoria uso > 85%
  - HTTP 5xx errors > 1%/min
  - Latencia p95 > 2s

Importantes:
  - Tasa de errores por servicio
  - Tiempo de respuesta promedio
  - Health checks fallidos
  - Espacio en disco < 20% libre";

pub(super) const BACKUP_HEADERS: [&str; 4] = ["Componente", "Frecuencia", "Retención", "Ubicación"];

pub(super) const BACKUPS: [[&str; 4]; 4] = [
    ["Bases de datos", "Diario (22:00)", "30 días", "/backups/db/"],
    [
        "Configuraciones",
        "Semanal (domingo)",
        "12 semanas",
        "/backups/config/",
    ],
    ["Logs importantes", "Mensual", "1 año", "NAS/Cloud Storage"],
    [
        "Imágenes contenedores",
        "Por versión",
        "5 versiones",
        "Registry interno",
    ],
];

/// Hardening checklist: `true` when the measure is applied.
pub(super) const HARDENING: [(bool, &str); 6] = [
    (true, "Contenedores ejecutan como usuario no-root"),
    (true, "Secrets en variables de entorno (no en código)"),
    (true, "Firewall configurado (ufw/iptables)"),
    (false, "Escaneo de vulnerabilidades periódico"),
    (true, "Logs de auditoría habilitados"),
    (false, "WAF (Web Application Firewall) implementado"),
];

pub(super) const INCIDENT_HEADERS: [&str; 4] =
    ["Síntoma", "Posible causa", "Acción inmediata", "Resolución"];

pub(super) const INCIDENTS: [[&str; 4]; 4] = [
    [
        "Error 502 en gateway",
        "Microservicio caído",
        "1. Verificar podman ps\n2. Revisar logs",
        "Restart del servicio",
    ],
    [
        "Alta latencia",
        "CPU/Memoria saturada",
        "1. Usar top/htop\n2. Escalar temporalmente",
        "Optimizar o escalar recursos",
    ],
    [
        "Conexión BD rechazada",
        "BD no responde",
        "1. Verificar proceso BD\n2. Check conexión",
        "Restart servicio BD",
    ],
    [
        "Disk space full",
        "Logs sin rotación",
        "1. df -h\n2. Limpiar logs antiguos",
        "Implementar log rotation",
    ],
];

pub(super) const IMPROVEMENT_HEADERS: [&str; 4] = ["Item", "Prioridad", "Estimado", "Notas"];

pub(super) const IMPROVEMENTS: [[&str; 4]; 5] = [
    [
        "Implementar CI/CD automático",
        "Alta",
        "2-3 sprints",
        "Jenkins/GitHub Actions",
    ],
    [
        "Migrar a Kubernetes",
        "Media",
        "Q3 2024",
        "Evaluar costos/beneficios",
    ],
    [
        "Centralizar logs con ELK",
        "Alta",
        "1 sprint",
        "Mejora debugging",
    ],
    [
        "Autoscaling horizontal",
        "Baja",
        "Q4 2024",
        "Depende de crecimiento tráfico",
    ],
    [
        "Monitoring avanzado",
        "Media",
        "Q2 2024",
        "Prometheus + Grafana dashboards",
    ],
];

pub(super) const PRE_DEPLOY_CHECKLIST: [&str; 7] = [
    "Backups completados",
    "Team notificado",
    "Ventana de mantenimiento confirmada",
    "Rollback plan listo",
    "Health checks configurados",
    "Documentación actualizada",
    "Tests de integración pasados",
];

pub(super) const SIGNATURE_HEADERS: [&str; 4] = ["Rol", "Nombre", "Firma", "Fecha"];

/// Signature rows: role, name, and whether the date column takes the build date.
pub(super) const SIGNATURES: [(&str, &str, bool); 4] = [
    ("Entrega (Desarrollo)", "[Tu Nombre Completo]", true),
    ("Recibe (Operaciones)", "[Nombre Receptor]", false),
    ("Testigo (Infraestructura)", "[Nombre Testigo]", false),
    ("Aprobación (Gerencia)", "[Nombre Gerente]", false),
];

pub(super) const SIGNATURE_LINE: &str = "__________";

/// Closing notes as (bold label, value); `None` takes the build date.
pub(super) const CLOSING_NOTES: [(&str, Option<&str>); 4] = [
    (
        "NOTA: ",
        Some("Este documento debe actualizarse con cada cambio arquitectónico significativo."),
    ),
    ("Última revisión: ", None),
    ("Próxima revisión programada: ", Some("[DD/MM/AAAA]")),
    (
        "Custodio del documento: ",
        Some("[Nombre del Arquitecto/Lead Técnico]"),
    ),
];
